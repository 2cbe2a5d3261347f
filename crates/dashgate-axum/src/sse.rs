//! SSE event broadcaster for real-time dashboard streaming.
//!
//! Events are fanned out to every connected client through a broadcast
//! channel. The latest event of each run-describing kind is retained and
//! replayed to clients that connect late, so a dashboard opened mid-run still
//! receives its configuration, parameters and totals.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use dashgate_core::{DashboardEvent, EventEmitter, EventKind};
use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::stream::EventStream;

/// Default number of events buffered per subscriber before it lags.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default interval between keep-alive comments.
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Kinds retained for late subscribers, in replay order.
pub const RETAINED_KINDS: [EventKind; 6] = [
    EventKind::Config,
    EventKind::Param,
    EventKind::Threshold,
    EventKind::Start,
    EventKind::Cumulative,
    EventKind::Stop,
];

/// SSE broadcaster implementing both the emitter port and the gateway's
/// event-stream capability.
#[derive(Debug)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<DashboardEvent>,
    retained: Mutex<HashMap<EventKind, DashboardEvent>>,
    closed: CancellationToken,
    keep_alive: Duration,
}

impl SseBroadcaster {
    /// Create a broadcaster with the given channel capacity.
    ///
    /// Slow clients skip events once `capacity` are buffered ahead of them.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            retained: Mutex::new(HashMap::new()),
            closed: CancellationToken::new(),
            keep_alive: DEFAULT_KEEP_ALIVE,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Override the keep-alive interval.
    #[must_use]
    pub const fn with_keep_alive(mut self, interval: Duration) -> Self {
        self.keep_alive = interval;
        self
    }

    /// Open a subscription: retained events first, then live events, until
    /// the broadcaster is closed.
    pub fn subscribe(&self) -> impl Stream<Item = DashboardEvent> + Send + 'static {
        // Subscribe and snapshot under the same lock `emit` holds, so every
        // event is seen exactly once, either replayed or live.
        let (receiver, backlog) = {
            let retained = self.lock_retained();
            let backlog: Vec<DashboardEvent> = RETAINED_KINDS
                .iter()
                .filter_map(|kind| retained.get(kind).cloned())
                .collect();
            (self.sender.subscribe(), backlog)
        };

        let live = BroadcastStream::new(receiver).filter_map(|result| async move {
            match result {
                Ok(event) => Some(event),
                Err(e) => {
                    debug!("SSE subscriber lagged: {}", e);
                    None
                }
            }
        });

        stream::iter(backlog)
            .chain(live)
            .take_until(self.closed.clone().cancelled_owned())
    }

    /// Create an SSE response for a new client connection.
    pub fn sse(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let stream = self.subscribe().map(|event| {
            Ok(Event::default()
                .event(event.kind.as_str())
                .data(event.data_json()))
        });

        Sse::new(stream).keep_alive(KeepAlive::new().interval(self.keep_alive))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    fn lock_retained(&self) -> std::sync::MutexGuard<'_, HashMap<EventKind, DashboardEvent>> {
        self.retained.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SseBroadcaster {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EventEmitter for SseBroadcaster {
    fn emit(&self, event: DashboardEvent) {
        if self.is_closed() {
            trace!(kind = %event.kind, "Dropping event emitted after close");
            return;
        }

        let mut retained = self.lock_retained();
        if RETAINED_KINDS.contains(&event.kind) {
            retained.insert(event.kind, event.clone());
        }
        // No subscribers is fine
        let _ = self.sender.send(event);
    }
}

#[async_trait]
impl EventStream for SseBroadcaster {
    async fn serve(&self, _request: Request) -> Response {
        debug!(subscribers = self.subscriber_count() + 1, "SSE client connected");
        self.sse().into_response()
    }

    fn close(&self) {
        if !self.closed.is_cancelled() {
            debug!(subscribers = self.subscriber_count(), "Closing SSE subscribers");
        }
        self.closed.cancel();
    }
}

/// Create a shared SSE broadcaster wrapped in Arc.
#[must_use]
pub fn create_broadcaster() -> Arc<SseBroadcaster> {
    Arc::new(SseBroadcaster::with_defaults())
}
