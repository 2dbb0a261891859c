//! Encoding and decoding of socket frames and match payloads

pub mod envelope_codec;
pub mod payload;
pub mod serde_helpers;

pub use envelope_codec::{decode_envelope, encode_envelope};
pub use payload::{decode_match_payload, encode_state, render_match_payload};
