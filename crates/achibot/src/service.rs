//! Seams between the harness and the external game service

use crate::session::Session;
use crate::socket::EventRegistry;
use achicore::DeviceId;
use achicore::protocol::{Match, MatchJoin, MatchmakingTicket};
use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A connected realtime channel for one session
#[async_trait]
pub trait RealtimeChannel: Send + Sync + 'static {
    /// Subscriptions for server-pushed events
    fn events(&self) -> &EventRegistry;

    /// Enter the matchmaker pool. Zero counts accept the server defaults.
    async fn add_matchmaker(
        &self,
        query: &str,
        min_count: u32,
        max_count: u32,
    ) -> Result<MatchmakingTicket>;

    async fn join_match(&self, join: MatchJoin) -> Result<Match>;

    /// Send state into a joined match (reliable, no reply)
    async fn send_match_state(&self, match_id: &str, op_code: i64, data: Bytes) -> Result<()>;
}

/// Authentication and connection establishment
#[async_trait]
pub trait GameService: Send + Sync {
    type Channel: RealtimeChannel;

    /// Authenticate a device, optionally creating its account
    async fn authenticate_device(
        &self,
        device_id: &DeviceId,
        create: bool,
        username: &str,
    ) -> Result<Session>;

    /// Open the realtime channel for an authenticated session
    async fn connect(&self, session: &Session, appear_online: bool) -> Result<Self::Channel>;
}
