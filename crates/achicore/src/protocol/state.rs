//! Match state payloads
//!
//! These are the application-level messages carried in the `data` field of
//! match state frames. Field names are PascalCase on the wire.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// 2D position on the game board
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Kind of node a player can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum NodeType {
    Transit = 1,
    Production = 2,
    Defense = 3,
}

impl TryFrom<u32> for NodeType {
    type Error = ProtocolError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NodeType::Transit),
            2 => Ok(NodeType::Production),
            3 => Ok(NodeType::Defense),
            other => Err(ProtocolError::InvalidNodeType(other)),
        }
    }
}

impl From<NodeType> for u32 {
    fn from(node_type: NodeType) -> Self {
        node_type as u32
    }
}

/// Build a node of `node_type` at `position`, linked from `from_node_id`
///
/// Sent with [`OpCode::BuildNode`](super::OpCode::BuildNode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildNodeRequest {
    #[serde(rename = "FromNodeID")]
    pub from_node_id: u32,

    #[serde(rename = "Type")]
    pub node_type: NodeType,

    #[serde(rename = "Position")]
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_node_wire_shape() {
        let req = BuildNodeRequest {
            from_node_id: 1,
            node_type: NodeType::Transit,
            position: Vec2::new(0.0, -100.0),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["FromNodeID"], json!(1));
        assert_eq!(value["Type"], json!(1));
        assert_eq!(value["Position"]["X"].as_f64(), Some(0.0));
        assert_eq!(value["Position"]["Y"].as_f64(), Some(-100.0));
    }

    #[test]
    fn test_build_node_accepts_integer_coordinates() {
        let raw = r#"{"FromNodeID":1,"Type":1,"Position":{"X":0,"Y":100}}"#;
        let req: BuildNodeRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.position, Vec2::new(0.0, 100.0));
        assert_eq!(req.node_type, NodeType::Transit);
    }

    #[test]
    fn test_unknown_node_type_is_rejected() {
        let raw = r#"{"FromNodeID":1,"Type":9,"Position":{"X":0,"Y":0}}"#;
        assert!(serde_json::from_str::<BuildNodeRequest>(raw).is_err());
    }
}
