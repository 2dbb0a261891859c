//! Authenticated sessions

use achicore::protocol::SessionClaims;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Reply body of a device authentication call
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub created: bool,
    pub token: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// Server-issued credential for one simulated client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token, also used to open the realtime socket
    pub token: String,

    /// Token for refreshing the session (unused; sessions are never refreshed)
    pub refresh_token: String,

    /// Whether authentication created a new account
    pub created: bool,

    /// Server user ID
    pub user_id: String,

    /// Username the server assigned
    pub username: String,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from an authentication reply
    pub fn from_response(response: AuthResponse) -> achicore::Result<Self> {
        let claims = SessionClaims::decode(&response.token)?;
        Ok(Self {
            token: response.token,
            refresh_token: response.refresh_token,
            created: response.created,
            user_id: claims.user_id,
            username: claims.username,
            expires_at: claims.expires_at,
        })
    }

    /// Check whether the session has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
