//! Client errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Authentication failed with HTTP {status}: {body}")]
    AuthFailed {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Socket closed")]
    SocketClosed,

    #[error("Socket closed before reply to request {0}")]
    NoReply(String),

    #[error("Match notification carries neither a match ID nor a token")]
    NoMatchToJoin,

    #[error(transparent)]
    Protocol(#[from] achicore::ProtocolError),
}
