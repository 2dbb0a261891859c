//! Session token claims
//!
//! Session tokens are JWTs. The client never verifies the signature; it only
//! reads the payload to learn who it is and when the session expires.

use crate::error::{ProtocolError, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawClaims {
    uid: String,
    usn: String,
    exp: i64,
}

impl SessionClaims {
    /// Decode the payload segment of a JWT
    pub fn decode(token: &str) -> Result<Self> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(ProtocolError::InvalidToken("expected three segments")),
        };

        // Some encoders keep the padding; the URL-safe engine here does not accept it
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        let raw: RawClaims = serde_json::from_slice(&bytes)?;

        let expires_at = DateTime::from_timestamp(raw.exp, 0)
            .ok_or(ProtocolError::InvalidToken("expiry out of range"))?;

        Ok(Self {
            user_id: raw.uid,
            username: raw.usn,
            expires_at,
        })
    }
}
