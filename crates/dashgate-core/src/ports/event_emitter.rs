//! Event emitter trait for publishing dashboard events.
//!
//! Producers (a live test run, a recording replay) push events through this
//! port. Implementations handle transport details such as SSE fan-out.

use crate::events::DashboardEvent;

/// Trait for publishing dashboard events to whoever is listening.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and contexts without subscribers
/// - `dashgate_axum::SseBroadcaster` - Streams events over SSE
pub trait EventEmitter: Send + Sync {
    /// Publish an event.
    ///
    /// Must not block. Emitting with no subscribers is not an error.
    fn emit(&self, event: DashboardEvent);
}

/// An emitter that discards every event.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: DashboardEvent) {}
}
