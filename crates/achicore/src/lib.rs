//! # achicore
//!
//! Core protocol library for achikaps game clients.
//!
//! This library provides the building blocks shared by bots, test harnesses
//! and other tools that talk to an achikaps game server:
//!
//! - Device identity generation
//! - Realtime socket envelopes (matchmaker, match join, match state)
//! - Match state payloads and op codes
//! - JSON/base64 codec helpers
//! - Session token claim decoding
//!
//! ## Example
//!
//! ```rust
//! use achicore::protocol::{BuildNodeRequest, NodeType, OpCode, Vec2};
//! use achicore::codec::encode_state;
//!
//! let request = BuildNodeRequest {
//!     from_node_id: 1,
//!     node_type: NodeType::Transit,
//!     position: Vec2::new(0.0, -100.0),
//! };
//! let data = encode_state(&request).unwrap();
//! assert_eq!(OpCode::BuildNode.to_i64(), 2);
//! assert!(!data.is_empty());
//! ```

pub mod codec;
pub mod error;
pub mod identity;
pub mod protocol;

// Re-export commonly used types
pub use error::{ProtocolError, Result};
pub use identity::{DeviceId, generate_device_id};
pub use protocol::{ClientEnvelope, ClientMessage, OpCode, ServerEnvelope, ServerMessage};
