//! Realtime socket tests against an in-process WebSocket server

use achibot::harness::attach_handlers;
use achibot::service::RealtimeChannel;
use achibot::socket::Socket;
use achicore::protocol::MatchJoin;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

/// Minimal matchmaking server for a single client
///
/// Replies to `matchmaker_add` with a ticket and immediately pushes a
/// `matchmaker_matched`, answers `match_join` for `match-1` (errors
/// otherwise), and forwards every `match_data_send` to `sent`.
async fn spawn_server(sent: mpsc::UnboundedSender<Value>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        while let Some(Ok(frame)) = ws.next().await {
            let Message::Text(text) = frame else {
                continue;
            };
            let request: Value = serde_json::from_str(&text).unwrap();
            let cid = request["cid"].clone();

            let mut replies = Vec::new();
            if request.get("matchmaker_add").is_some() {
                replies.push(json!({"cid": cid, "matchmaker_ticket": {"ticket": "ticket-1"}}));
                replies.push(json!({"matchmaker_matched": {"ticket": "ticket-1", "match_id": "match-1"}}));
            } else if let Some(join) = request.get("match_join") {
                if join["match_id"] == "match-1" {
                    replies.push(json!({"cid": cid, "match": {"match_id": "match-1", "size": 2}}));
                } else {
                    replies.push(json!({"cid": cid, "error": {"code": 4, "message": "Match not found"}}));
                }
            } else if let Some(data) = request.get("match_data_send") {
                sent.send(data.clone()).unwrap();
            }

            for reply in replies {
                ws.send(Message::Text(reply.to_string())).await.unwrap();
            }
        }
    });

    addr
}

#[tokio::test]
async fn test_matchmaking_round_trip_over_socket() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();
    let addr = spawn_server(sent_tx).await;

    let socket = Arc::new(
        Socket::connect(&format!("ws://{}/ws", addr))
            .await
            .expect("connect"),
    );
    attach_handlers(0, &socket, 100.0);

    let ticket = socket.add_matchmaker("", 0, 0).await.expect("ticket");
    assert_eq!(ticket.as_str(), "ticket-1");

    // The matched handler joins and sends the starting update on its own
    let sent = timeout(Duration::from_secs(5), sent_rx.recv())
        .await
        .expect("update within timeout")
        .expect("server alive");

    assert_eq!(sent["match_id"], "match-1");
    assert_eq!(sent["op_code"], "2");
    assert_eq!(sent["reliable"], true);

    let data = STANDARD.decode(sent["data"].as_str().unwrap()).unwrap();
    let update: Value = serde_json::from_slice(&data).unwrap();
    assert_eq!(update["Position"]["X"].as_f64(), Some(0.0));
    assert_eq!(update["Position"]["Y"].as_f64(), Some(-100.0));

    // Exactly one update
    let extra = timeout(Duration::from_millis(200), sent_rx.recv()).await;
    assert!(extra.is_err());
}

#[tokio::test]
async fn test_server_error_reply_fails_request() {
    let (sent_tx, _sent_rx) = mpsc::unbounded_channel();
    let addr = spawn_server(sent_tx).await;

    let socket = Socket::connect(&format!("ws://{}/ws", addr)).await.unwrap();

    let err = socket
        .join_match(MatchJoin::by_id("nope"))
        .await
        .unwrap_err();
    assert!(format!("{}", err).contains("Match not found"));

    let joined = socket.join_match(MatchJoin::by_id("match-1")).await.unwrap();
    assert_eq!(joined.match_id, "match-1");
    assert_eq!(joined.size, 2);
}

#[tokio::test]
async fn test_requests_fail_once_server_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.close(None).await.ok();
    });

    let socket = Socket::connect(&format!("ws://{}/ws", addr)).await.unwrap();

    let result = timeout(Duration::from_secs(5), socket.add_matchmaker("", 0, 0))
        .await
        .expect("request should not hang");
    assert!(result.is_err());
}
