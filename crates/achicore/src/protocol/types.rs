//! Realtime message bodies
//!
//! Field names follow the server's JSON encoding. The server omits fields
//! holding default values, so nearly everything on the receiving side is
//! `#[serde(default)]`.

use crate::codec::serde_helpers::{base64_bytes, int64_string};
use crate::error::{ProtocolError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A user's presence on the server (one per connected session)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPresence {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub session_id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub persistence: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

/// Request to join the matchmaker pool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchmakerAdd {
    pub min_count: u32,
    pub max_count: u32,
    pub query: String,
    pub string_properties: HashMap<String, String>,
    pub numeric_properties: HashMap<String, f64>,
}

impl MatchmakerAdd {
    pub fn new(query: impl Into<String>, min_count: u32, max_count: u32) -> Self {
        Self {
            min_count,
            max_count,
            query: query.into(),
            string_properties: HashMap::new(),
            numeric_properties: HashMap::new(),
        }
    }
}

/// Request to join a match, either by ID or by matchmaker token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchJoin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl MatchJoin {
    pub fn by_id(match_id: impl Into<String>) -> Self {
        Self {
            match_id: Some(match_id.into()),
            ..Self::default()
        }
    }

    pub fn by_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// Match state sent into a joined match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDataSend {
    pub match_id: String,

    #[serde(with = "int64_string")]
    pub op_code: i64,

    #[serde(with = "base64_bytes")]
    pub data: Bytes,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presences: Vec<UserPresence>,

    pub reliable: bool,
}

// ---------------------------------------------------------------------------
// Server -> client
// ---------------------------------------------------------------------------

/// Reply to a matchmaker add
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MatchmakerTicket {
    #[serde(default)]
    pub ticket: String,
}

/// A joined match
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Match {
    pub match_id: String,

    #[serde(default)]
    pub authoritative: bool,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub size: u32,

    #[serde(default)]
    pub presences: Vec<UserPresence>,

    #[serde(rename = "self", default)]
    pub self_presence: Option<UserPresence>,
}

/// State pushed by the server (or another player) inside a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MatchData {
    pub match_id: String,

    #[serde(default)]
    pub presence: Option<UserPresence>,

    #[serde(default, with = "int64_string")]
    pub op_code: i64,

    #[serde(default, with = "base64_bytes")]
    pub data: Bytes,

    #[serde(default)]
    pub reliable: bool,
}

/// One user in a matchmaker result
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchmakerUser {
    #[serde(default)]
    pub presence: UserPresence,

    #[serde(default)]
    pub party_id: String,

    #[serde(default)]
    pub string_properties: HashMap<String, String>,

    #[serde(default)]
    pub numeric_properties: HashMap<String, f64>,
}

/// Notification that the matchmaker has paired this ticket
///
/// Authoritative matches come with a `match_id`, relayed ones with a `token`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatchmakerMatched {
    #[serde(default)]
    pub ticket: String,

    #[serde(default)]
    pub match_id: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub users: Vec<MatchmakerUser>,

    #[serde(rename = "self", default)]
    pub self_user: Option<MatchmakerUser>,
}

impl MatchmakerMatched {
    /// The join request this notification points at
    pub fn join_request(&self) -> Option<MatchJoin> {
        match (&self.match_id, &self.token) {
            (Some(id), _) if !id.is_empty() => Some(MatchJoin::by_id(id.clone())),
            (_, Some(token)) if !token.is_empty() => Some(MatchJoin::by_token(token.clone())),
            _ => None,
        }
    }
}

/// Error reply from the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub code: i32,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl From<ServerError> for ProtocolError {
    fn from(err: ServerError) -> Self {
        ProtocolError::Server {
            code: err.code,
            message: err.message,
        }
    }
}

/// Handle for a pending matchmaking request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchmakingTicket(String);

impl MatchmakingTicket {
    pub fn new(ticket: impl Into<String>) -> Result<Self> {
        let ticket = ticket.into();
        if ticket.is_empty() {
            return Err(ProtocolError::EmptyTicket);
        }
        Ok(Self(ticket))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<MatchmakerTicket> for MatchmakingTicket {
    type Error = ProtocolError;

    fn try_from(reply: MatchmakerTicket) -> Result<Self> {
        Self::new(reply.ticket)
    }
}

impl fmt::Display for MatchmakingTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
