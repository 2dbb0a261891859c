//! Match harness: bootstrap simulated clients and put them through matchmaking
//!
//! Every client is authenticated and connected one after the other, gets its
//! event handlers, and only then are matchmaking requests submitted, again one
//! after the other. Once the server pairs the clients each one joins the
//! match and sends a single build request from its starting position.

use crate::config::Config;
use crate::error::ClientError;
use crate::service::{GameService, RealtimeChannel};
use crate::session::Session;
use achicore::DeviceId;
use achicore::codec::{encode_state, render_match_payload};
use achicore::protocol::{
    BuildNodeRequest, MatchData, MatchmakerMatched, MatchmakingTicket, NodeType, OpCode, Vec2,
};
use anyhow::{Context, Result};
use std::sync::{Arc, Weak};

/// Node every player starts from
const ROOT_NODE_ID: u32 = 1;

/// One simulated client
pub struct Connection<C> {
    /// Position in bootstrap order
    pub index: usize,
    pub device_id: DeviceId,
    pub session: Session,
    pub channel: Arc<C>,
}

pub struct Harness<S: GameService> {
    service: S,
    config: Config,
}

impl<S: GameService> Harness<S> {
    pub fn new(service: S, config: Config) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authenticate and connect every client, in order
    pub async fn bootstrap(&self) -> Result<Vec<Connection<S::Channel>>> {
        let settings = &self.config.harness;
        let mut connections = Vec::with_capacity(settings.clients);

        for index in 0..settings.clients {
            let device_id = DeviceId::generate();
            let username = device_id.display_name(&settings.username_prefix);

            let session = self
                .service
                .authenticate_device(&device_id, true, &username)
                .await
                .with_context(|| format!("Client {} failed to authenticate", index))?;

            let channel = self
                .service
                .connect(&session, settings.appear_online)
                .await
                .with_context(|| format!("Client {} failed to connect", index))?;
            let channel = Arc::new(channel);

            attach_handlers(index, &channel, settings.start_offset);

            tracing::info!(
                "Client {} connected as {} (device {})",
                index,
                session.username,
                device_id
            );

            connections.push(Connection {
                index,
                device_id,
                session,
                channel,
            });
        }

        Ok(connections)
    }

    /// Put every connection into the matchmaker, in order
    pub async fn submit_matchmaking(
        &self,
        connections: &[Connection<S::Channel>],
    ) -> Result<Vec<MatchmakingTicket>> {
        let matchmaker = &self.config.matchmaker;
        let mut tickets = Vec::with_capacity(connections.len());

        for conn in connections {
            let ticket = conn
                .channel
                .add_matchmaker(&matchmaker.query, matchmaker.min_count, matchmaker.max_count)
                .await
                .with_context(|| format!("Client {} failed to join the matchmaker", conn.index))?;

            tracing::info!("{} mmTicket {}", conn.session.username, ticket);
            tickets.push(ticket);
        }

        Ok(tickets)
    }

    /// Bootstrap all clients and submit their matchmaking requests
    ///
    /// The returned connections must be kept alive for the handlers to keep
    /// running.
    pub async fn run(&self) -> Result<Vec<Connection<S::Channel>>> {
        let connections = self.bootstrap().await?;
        self.submit_matchmaking(&connections).await?;
        Ok(connections)
    }
}

/// Register the match data and matchmaker handlers on a client's channel
pub fn attach_handlers<C: RealtimeChannel>(index: usize, channel: &Arc<C>, start_offset: f64) {
    channel.events().on_match_data(log_match_data);

    // The registry lives inside the channel, so the handler must not own it
    let weak = Arc::downgrade(channel);
    channel
        .events()
        .on_matchmaker_matched(move |matched| matched_with(weak.clone(), index, matched, start_offset));
}

/// Starting build request for the client at `index`
///
/// The first client starts below the origin, every other one above it.
pub fn starting_update(index: usize, start_offset: f64) -> BuildNodeRequest {
    let y = if index == 0 { -start_offset } else { start_offset };
    BuildNodeRequest {
        from_node_id: ROOT_NODE_ID,
        node_type: NodeType::Transit,
        position: Vec2::new(0.0, y),
    }
}

/// Pretty-print received match data
pub async fn log_match_data(data: MatchData) -> Result<()> {
    let rendered = render_match_payload(&data.data)
        .with_context(|| format!("Undecodable match data in {}", data.match_id))?;
    tracing::info!("{}", rendered);
    Ok(())
}

/// Join the matched game and send this client's starting update
pub async fn on_matched<C>(
    channel: &C,
    index: usize,
    matched: MatchmakerMatched,
    start_offset: f64,
) -> Result<()>
where
    C: RealtimeChannel + ?Sized,
{
    let join = matched.join_request().ok_or(ClientError::NoMatchToJoin)?;
    let joined = channel.join_match(join).await?;
    tracing::info!("matchmakermatched{} {:?}", index, joined);

    let update = starting_update(index, start_offset);
    let data = encode_state(&update)?;
    channel
        .send_match_state(&joined.match_id, OpCode::BuildNode.to_i64(), data)
        .await?;

    tracing::debug!(
        "Client {} sent starting position ({}, {})",
        index,
        update.position.x,
        update.position.y
    );
    Ok(())
}

async fn matched_with<C: RealtimeChannel>(
    channel: Weak<C>,
    index: usize,
    matched: MatchmakerMatched,
    start_offset: f64,
) -> Result<()> {
    let channel = channel.upgrade().ok_or(ClientError::SocketClosed)?;
    on_matched(channel.as_ref(), index, matched, start_offset).await
}
