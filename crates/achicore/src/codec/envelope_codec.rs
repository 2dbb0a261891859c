//! Socket frame codec

use crate::error::Result;
use crate::protocol::{ClientEnvelope, ServerEnvelope};

/// Encode an outgoing envelope as a text frame
pub fn encode_envelope(envelope: &ClientEnvelope) -> Result<String> {
    Ok(serde_json::to_string(envelope)?)
}

/// Decode an incoming text frame
pub fn decode_envelope(text: &str) -> Result<ServerEnvelope> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        ClientMessage, MatchDataSend, MatchJoin, MatchmakerAdd, ServerMessage,
    };
    use bytes::Bytes;
    use serde_json::{Value, json};

    fn to_value(envelope: &ClientEnvelope) -> Value {
        serde_json::from_str(&encode_envelope(envelope).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_matchmaker_add() {
        let envelope = ClientEnvelope::request(
            "1",
            ClientMessage::MatchmakerAdd(MatchmakerAdd::new("", 0, 0)),
        );

        assert_eq!(
            to_value(&envelope),
            json!({
                "cid": "1",
                "matchmaker_add": {
                    "min_count": 0,
                    "max_count": 0,
                    "query": "",
                    "string_properties": {},
                    "numeric_properties": {}
                }
            })
        );
    }

    #[test]
    fn test_encode_match_join() {
        let envelope =
            ClientEnvelope::request("7", ClientMessage::MatchJoin(MatchJoin::by_id("abc.nakama")));
        assert_eq!(
            to_value(&envelope),
            json!({"cid": "7", "match_join": {"match_id": "abc.nakama"}})
        );
    }

    #[test]
    fn test_encode_match_data_send() {
        let envelope = ClientEnvelope::notify(ClientMessage::MatchDataSend(MatchDataSend {
            match_id: "abc".into(),
            op_code: 2,
            data: Bytes::from_static(b"{\"a\":1}"),
            presences: vec![],
            reliable: true,
        }));

        assert_eq!(
            to_value(&envelope),
            json!({
                "match_data_send": {
                    "match_id": "abc",
                    "op_code": "2",
                    "data": "eyJhIjoxfQ==",
                    "reliable": true
                }
            })
        );
    }

    #[test]
    fn test_decode_ticket_reply() {
        let envelope =
            decode_envelope(r#"{"cid":"1","matchmaker_ticket":{"ticket":"t-123"}}"#).unwrap();
        assert_eq!(envelope.cid.as_deref(), Some("1"));
        assert!(envelope.is_reply());
        match envelope.message {
            ServerMessage::MatchmakerTicket(t) => assert_eq!(t.ticket, "t-123"),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_match_data_push() {
        let envelope = decode_envelope(
            r#"{"match_data":{"match_id":"m","op_code":"2","data":"eyJhIjoxfQ==","reliable":true}}"#,
        )
        .unwrap();
        assert!(!envelope.is_reply());
        match envelope.message {
            ServerMessage::MatchData(data) => {
                assert_eq!(data.op_code, 2);
                assert_eq!(&data.data[..], b"{\"a\":1}");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_numeric_op_code_and_missing_fields() {
        let envelope = decode_envelope(r#"{"match_data":{"match_id":"m","op_code":1}}"#).unwrap();
        match envelope.message {
            ServerMessage::MatchData(data) => {
                assert_eq!(data.op_code, 1);
                assert!(data.data.is_empty());
                assert!(data.presence.is_none());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_matchmaker_matched() {
        let envelope = decode_envelope(
            r#"{"matchmaker_matched":{"ticket":"t","match_id":"m.node","users":[{"presence":{"user_id":"u","session_id":"s","username":"n"}}]}}"#,
        )
        .unwrap();
        match envelope.message {
            ServerMessage::MatchmakerMatched(matched) => {
                assert_eq!(matched.match_id.as_deref(), Some("m.node"));
                assert_eq!(matched.users.len(), 1);
                assert_eq!(matched.users[0].presence.username, "n");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_and_unknown() {
        let envelope =
            decode_envelope(r#"{"cid":"3","error":{"code":3,"message":"bad query"}}"#).unwrap();
        assert_eq!(envelope.message.kind(), "error");

        let envelope = decode_envelope(r#"{"status_presence_event":{}}"#).unwrap();
        assert_eq!(envelope.message, ServerMessage::Unknown);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode_envelope(r#"{"match_data":{"match_id":"m","data":"%%%"}}"#).is_err());
    }
}
