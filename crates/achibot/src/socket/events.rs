//! Typed event subscriptions for server-pushed socket messages
//!
//! One handler per event kind. Registering a handler for a kind that already
//! has one replaces it.

use achicore::protocol::{MatchData, MatchmakerMatched};
use anyhow::Result;
use dashmap::DashMap;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Future returned by a registered handler
pub type HandlerFuture = BoxFuture<'static, Result<()>>;

type Handler<T> = Arc<dyn Fn(T) -> HandlerFuture + Send + Sync>;

/// Kinds of server-pushed events a handler can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MatchData,
    MatchmakerMatched,
}

/// A server-pushed event with its typed payload
#[derive(Debug, Clone)]
pub enum SocketEvent {
    MatchData(MatchData),
    MatchmakerMatched(MatchmakerMatched),
}

impl SocketEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SocketEvent::MatchData(_) => EventKind::MatchData,
            SocketEvent::MatchmakerMatched(_) => EventKind::MatchmakerMatched,
        }
    }
}

#[derive(Clone)]
enum RegisteredHandler {
    MatchData(Handler<MatchData>),
    MatchmakerMatched(Handler<MatchmakerMatched>),
}

/// Handler table for one socket
#[derive(Default)]
pub struct EventRegistry {
    handlers: DashMap<EventKind, RegisteredHandler>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle match state pushed into a joined match
    pub fn on_match_data<F, Fut>(&self, handler: F)
    where
        F: Fn(MatchData) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler: Handler<MatchData> =
            Arc::new(move |data: MatchData| -> HandlerFuture { Box::pin(handler(data)) });
        self.handlers
            .insert(EventKind::MatchData, RegisteredHandler::MatchData(handler));
    }

    /// Handle the matchmaker pairing this socket's ticket
    pub fn on_matchmaker_matched<F, Fut>(&self, handler: F)
    where
        F: Fn(MatchmakerMatched) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler: Handler<MatchmakerMatched> =
            Arc::new(move |matched: MatchmakerMatched| -> HandlerFuture { Box::pin(handler(matched)) });
        self.handlers.insert(
            EventKind::MatchmakerMatched,
            RegisteredHandler::MatchmakerMatched(handler),
        );
    }

    /// Remove the handler for `kind`, if any
    pub fn clear(&self, kind: EventKind) {
        self.handlers.remove(&kind);
    }

    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Build the handler invocation for an event without running it
    pub fn handler_for(&self, event: SocketEvent) -> Option<HandlerFuture> {
        // Clone the handler out so the map shard is not locked while it runs
        let handler = self.handlers.get(&event.kind())?.value().clone();

        match (handler, event) {
            (RegisteredHandler::MatchData(handler), SocketEvent::MatchData(data)) => {
                Some(handler(data))
            }
            (RegisteredHandler::MatchmakerMatched(handler), SocketEvent::MatchmakerMatched(m)) => {
                Some(handler(m))
            }
            _ => None,
        }
    }

    /// Run the handler for an event as its own task
    ///
    /// Returns `None` when nothing is subscribed to the event's kind. Handler
    /// errors are logged, not propagated.
    pub fn dispatch(&self, event: SocketEvent) -> Option<JoinHandle<()>> {
        let kind = event.kind();

        let Some(invocation) = self.handler_for(event) else {
            tracing::debug!("No handler for {:?}, dropping event", kind);
            return None;
        };

        Some(tokio::spawn(async move {
            if let Err(e) = invocation.await {
                tracing::error!("{:?} handler failed: {:#}", kind, e);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn match_data() -> SocketEvent {
        SocketEvent::MatchData(MatchData {
            match_id: "m".into(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_dispatch_without_handler() {
        let registry = EventRegistry::new();
        assert!(registry.dispatch(match_data()).is_none());
    }

    #[tokio::test]
    async fn test_registration_replaces_previous_handler() {
        let registry = EventRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        registry.on_match_data(move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let counter = second.clone();
        registry.on_match_data(move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        registry.dispatch(match_data()).unwrap().await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handlers_are_per_kind() {
        let registry = EventRegistry::new();
        registry.on_matchmaker_matched(|_| async { Ok(()) });

        assert!(registry.is_registered(EventKind::MatchmakerMatched));
        assert!(!registry.is_registered(EventKind::MatchData));
        assert!(registry.dispatch(match_data()).is_none());

        registry.clear(EventKind::MatchmakerMatched);
        assert!(!registry.is_registered(EventKind::MatchmakerMatched));
    }

    #[tokio::test]
    async fn test_handler_error_surfaces_from_invocation() {
        let registry = EventRegistry::new();
        registry.on_match_data(|_| async { Err(anyhow::anyhow!("bad payload")) });

        let result = registry.handler_for(match_data()).unwrap().await;
        assert!(result.is_err());
    }
}
