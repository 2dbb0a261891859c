//! Realtime socket envelopes
//!
//! Every socket frame is a JSON object holding an optional `cid` and exactly
//! one message keyed by its kind, e.g.
//! `{"cid":"1","matchmaker_add":{...}}`. Requests that expect a reply carry a
//! `cid`; the server echoes it on the reply.

use super::types::{
    Match, MatchData, MatchDataSend, MatchJoin, MatchmakerAdd, MatchmakerMatched,
    MatchmakerTicket, ServerError,
};
use serde::{Deserialize, Serialize};

/// Messages the client sends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMessage {
    MatchmakerAdd(MatchmakerAdd),
    MatchJoin(MatchJoin),
    MatchDataSend(MatchDataSend),
}

impl ClientMessage {
    /// Whether the server answers this message with a correlated reply
    pub fn expects_reply(&self) -> bool {
        !matches!(self, ClientMessage::MatchDataSend(_))
    }
}

/// Outgoing socket frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,

    #[serde(flatten)]
    pub message: ClientMessage,
}

impl ClientEnvelope {
    /// Envelope for a request awaiting a reply
    pub fn request(cid: impl Into<String>, message: ClientMessage) -> Self {
        Self {
            cid: Some(cid.into()),
            message,
        }
    }

    /// Envelope without correlation
    pub fn notify(message: ClientMessage) -> Self {
        Self { cid: None, message }
    }
}

/// Messages the server sends
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    MatchmakerTicket(MatchmakerTicket),
    Match(Match),
    MatchData(MatchData),
    MatchmakerMatched(MatchmakerMatched),
    Error(ServerError),
    /// Any message kind this client does not act on (status, notifications...)
    Unknown,
}

impl ServerMessage {
    /// Short name of the message kind, for logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::MatchmakerTicket(_) => "matchmaker_ticket",
            ServerMessage::Match(_) => "match",
            ServerMessage::MatchData(_) => "match_data",
            ServerMessage::MatchmakerMatched(_) => "matchmaker_matched",
            ServerMessage::Error(_) => "error",
            ServerMessage::Unknown => "unknown",
        }
    }
}

/// Incoming socket frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawServerEnvelope")]
pub struct ServerEnvelope {
    pub cid: Option<String>,
    pub message: ServerMessage,
}

impl ServerEnvelope {
    /// Server-pushed frames carry no `cid`
    pub fn is_reply(&self) -> bool {
        self.cid.as_deref().is_some_and(|cid| !cid.is_empty())
    }
}

#[derive(Deserialize)]
struct RawServerEnvelope {
    #[serde(default)]
    cid: Option<String>,
    #[serde(default)]
    matchmaker_ticket: Option<MatchmakerTicket>,
    #[serde(default, rename = "match")]
    joined_match: Option<Match>,
    #[serde(default)]
    match_data: Option<MatchData>,
    #[serde(default)]
    matchmaker_matched: Option<MatchmakerMatched>,
    #[serde(default)]
    error: Option<ServerError>,
}

impl From<RawServerEnvelope> for ServerEnvelope {
    fn from(raw: RawServerEnvelope) -> Self {
        let message = if let Some(error) = raw.error {
            ServerMessage::Error(error)
        } else if let Some(ticket) = raw.matchmaker_ticket {
            ServerMessage::MatchmakerTicket(ticket)
        } else if let Some(joined) = raw.joined_match {
            ServerMessage::Match(joined)
        } else if let Some(data) = raw.match_data {
            ServerMessage::MatchData(data)
        } else if let Some(matched) = raw.matchmaker_matched {
            ServerMessage::MatchmakerMatched(matched)
        } else {
            ServerMessage::Unknown
        };

        Self {
            cid: raw.cid,
            message,
        }
    }
}
