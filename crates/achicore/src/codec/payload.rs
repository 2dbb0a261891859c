//! Match payload helpers
//!
//! Received match data has no fixed schema here, so it is decoded to a
//! generic JSON value. Decoding failures are reported, never papered over.

use crate::error::Result;
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Decode a received payload: UTF-8 text holding one JSON document
pub fn decode_match_payload(data: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(data)?;
    Ok(serde_json::from_str(text)?)
}

/// Decode a received payload and pretty-print it with two-space indentation
pub fn render_match_payload(data: &[u8]) -> Result<String> {
    let value = decode_match_payload(data)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Encode an outgoing state message
pub fn encode_state<T: Serialize>(state: &T) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(state)?))
}
