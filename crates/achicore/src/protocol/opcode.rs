//! Match op codes understood by the game's server module

use crate::error::ProtocolError;

/// Op code attached to every match state message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum OpCode {
    /// Full match state pushed by the server
    InitialState = 1,
    /// Request to build a node next to an existing one
    BuildNode = 2,
    /// Execute a unit action
    UnitActionExecute = 3,
}

impl OpCode {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(OpCode::InitialState),
            2 => Some(OpCode::BuildNode),
            3 => Some(OpCode::UnitActionExecute),
            _ => None,
        }
    }

    pub fn to_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for OpCode {
    type Error = ProtocolError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_i64(value).ok_or(ProtocolError::InvalidOpCode(value))
    }
}

impl From<OpCode> for i64 {
    fn from(op: OpCode) -> Self {
        op.to_i64()
    }
}
