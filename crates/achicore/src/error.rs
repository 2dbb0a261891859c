//! Error types

use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid device ID: {0:?}")]
    InvalidDeviceId(String),

    #[error("Invalid op code: {0}")]
    InvalidOpCode(i64),

    #[error("Invalid node type: {0}")]
    InvalidNodeType(u32),

    #[error("Invalid session token: {0}")]
    InvalidToken(&'static str),

    #[error("Empty matchmaker ticket")]
    EmptyTicket,

    #[error("Server error {code}: {message}")]
    Server { code: i32, message: String },

    #[error("Unexpected reply: expected {expected}, got {got}")]
    UnexpectedReply {
        expected: &'static str,
        got: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
