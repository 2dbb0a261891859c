//! Realtime socket
//!
//! A [`Socket`] owns two background tasks: a writer draining an outgoing
//! queue into the WebSocket, and a reader that routes replies to waiting
//! requests by `cid` and hands server-pushed events to the
//! [`EventRegistry`].

pub mod events;

pub use events::{EventKind, EventRegistry, HandlerFuture, SocketEvent};

use crate::error::ClientError;
use crate::service::RealtimeChannel;
use achicore::ProtocolError;
use achicore::codec::{decode_envelope, encode_envelope};
use achicore::protocol::{
    ClientEnvelope, ClientMessage, Match, MatchDataSend, MatchJoin, MatchmakerAdd,
    MatchmakingTicket, ServerMessage,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use futures::{SinkExt, Stream, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::{self, Message};

type PendingMap = DashMap<String, oneshot::Sender<ServerMessage>>;

/// Connected realtime socket
pub struct Socket {
    outgoing: mpsc::UnboundedSender<Message>,
    pending: Arc<PendingMap>,
    events: Arc<EventRegistry>,
    closed: Arc<AtomicBool>,
    next_cid: AtomicU64,
}

impl Socket {
    /// Open a socket to `url` (token and options already in the query string)
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(url)
            .await
            .context("Failed to open realtime socket")?;

        let (mut sink, stream) = stream.split();
        let (outgoing, mut queue) = mpsc::unbounded_channel::<Message>();

        tokio::spawn(async move {
            while let Some(message) = queue.recv().await {
                if let Err(e) = sink.send(message).await {
                    tracing::warn!("Failed to write to socket: {}", e);
                    break;
                }
            }
        });

        let pending = Arc::new(PendingMap::new());
        let events = Arc::new(EventRegistry::new());
        let closed = Arc::new(AtomicBool::new(false));

        tokio::spawn(read_loop(
            stream,
            pending.clone(),
            events.clone(),
            closed.clone(),
        ));

        Ok(Self {
            outgoing,
            pending,
            events,
            closed,
            next_cid: AtomicU64::new(1),
        })
    }

    /// Whether the server side has gone away
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Send a request and wait for its correlated reply
    async fn request(&self, message: ClientMessage) -> Result<ServerMessage> {
        let cid = self.next_cid.fetch_add(1, Ordering::Relaxed).to_string();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.insert(cid.clone(), reply_tx);

        // The reader sets `closed` before draining the pending map
        if self.is_closed() {
            self.pending.remove(&cid);
            return Err(ClientError::SocketClosed.into());
        }

        let text = encode_envelope(&ClientEnvelope::request(cid.clone(), message))?;
        if self.outgoing.send(Message::Text(text)).is_err() {
            self.pending.remove(&cid);
            return Err(ClientError::SocketClosed.into());
        }

        let reply = reply_rx.await.map_err(|_| ClientError::NoReply(cid))?;
        match reply {
            ServerMessage::Error(err) => Err(ProtocolError::from(err).into()),
            other => Ok(other),
        }
    }

    /// Send a message that gets no reply
    fn notify(&self, message: ClientMessage) -> Result<()> {
        let text = encode_envelope(&ClientEnvelope::notify(message))?;
        self.outgoing
            .send(Message::Text(text))
            .map_err(|_| ClientError::SocketClosed)?;
        Ok(())
    }
}

#[async_trait]
impl RealtimeChannel for Socket {
    fn events(&self) -> &EventRegistry {
        &self.events
    }

    async fn add_matchmaker(
        &self,
        query: &str,
        min_count: u32,
        max_count: u32,
    ) -> Result<MatchmakingTicket> {
        let reply = self
            .request(ClientMessage::MatchmakerAdd(MatchmakerAdd::new(
                query, min_count, max_count,
            )))
            .await?;

        match reply {
            ServerMessage::MatchmakerTicket(ticket) => Ok(MatchmakingTicket::try_from(ticket)?),
            other => Err(ProtocolError::UnexpectedReply {
                expected: "matchmaker_ticket",
                got: other.kind(),
            }
            .into()),
        }
    }

    async fn join_match(&self, join: MatchJoin) -> Result<Match> {
        let reply = self.request(ClientMessage::MatchJoin(join)).await?;

        match reply {
            ServerMessage::Match(joined) => Ok(joined),
            other => Err(ProtocolError::UnexpectedReply {
                expected: "match",
                got: other.kind(),
            }
            .into()),
        }
    }

    async fn send_match_state(&self, match_id: &str, op_code: i64, data: Bytes) -> Result<()> {
        self.notify(ClientMessage::MatchDataSend(MatchDataSend {
            match_id: match_id.to_string(),
            op_code,
            data,
            presences: Vec::new(),
            reliable: true,
        }))
    }
}

/// Route incoming frames until the socket closes
async fn read_loop<S>(
    mut stream: S,
    pending: Arc<PendingMap>,
    events: Arc<EventRegistry>,
    closed: Arc<AtomicBool>,
) where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                tracing::info!("Socket closed by server: {:?}", frame);
                break;
            }
            Ok(Message::Binary(_)) => {
                tracing::warn!("Ignoring binary frame");
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Error reading from socket: {}", e);
                break;
            }
        };

        let envelope = match decode_envelope(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Undecodable frame: {}", e);
                continue;
            }
        };

        if let Some(cid) = envelope.cid.as_deref().filter(|cid| !cid.is_empty()) {
            match pending.remove(cid) {
                Some((_, reply)) => {
                    // The requester may have given up; nothing to do then
                    let _ = reply.send(envelope.message);
                }
                None => tracing::warn!("Reply for unknown request {}", cid),
            }
            continue;
        }

        match envelope.message {
            ServerMessage::MatchData(data) => {
                tracing::debug!(
                    "Match data for {} (op code {}, {} bytes)",
                    data.match_id,
                    data.op_code,
                    data.data.len()
                );
                events.dispatch(SocketEvent::MatchData(data));
            }
            ServerMessage::MatchmakerMatched(matched) => {
                tracing::debug!("Matchmaker matched ticket {}", matched.ticket);
                events.dispatch(SocketEvent::MatchmakerMatched(matched));
            }
            ServerMessage::Error(err) => {
                tracing::error!("Server error {}: {}", err.code, err.message);
            }
            other => {
                tracing::debug!("Ignoring {} message", other.kind());
            }
        }
    }

    closed.store(true, Ordering::SeqCst);
    // Dropping the senders fails every request still waiting
    pending.clear();
}
