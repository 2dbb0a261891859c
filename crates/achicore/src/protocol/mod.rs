//! Protocol definitions and structures

pub mod constants;
pub mod envelope;
pub mod opcode;
pub mod state;
pub mod token;
pub mod types;

pub use constants::*;
pub use envelope::{ClientEnvelope, ClientMessage, ServerEnvelope, ServerMessage};
pub use opcode::OpCode;
pub use state::{BuildNodeRequest, NodeType, Vec2};
pub use token::SessionClaims;
pub use types::{
    Match, MatchData, MatchDataSend, MatchJoin, MatchmakerAdd, MatchmakerMatched,
    MatchmakerTicket, MatchmakerUser, MatchmakingTicket, ServerError, UserPresence,
};
