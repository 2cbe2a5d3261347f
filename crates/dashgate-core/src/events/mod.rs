//! Dashboard event vocabulary.
//!
//! The gateway does not interpret event payloads; it only needs to know the
//! closed set of event names the dashboard UI subscribes to and how a recorded
//! event is laid out on disk.
//!
//! # Wire Format
//!
//! A recorded event is one JSON object per line:
//!
//! ```json
//! { "event": "snapshot", "data": { "http_reqs": { "count": 12 } } }
//! ```
//!
//! The same name is used as the SSE `event:` field when streaming.

mod recording;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use recording::parse_recording;

/// Name of the logical channel dashboard events are published on.
pub const EVENT_CHANNEL: &str = "events";

/// Kinds of events streamed to dashboard subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Periodic aggregation of metric values over the last period.
    Snapshot,
    /// Aggregation of metric values since the start of the run.
    Cumulative,
    /// The run has started.
    Start,
    /// The run has finished.
    Stop,
    /// Dashboard layout and display configuration.
    Config,
    /// New metric definitions.
    Metric,
    /// Run parameters (duration, scenarios, tags).
    Param,
    /// Threshold definitions and their current state.
    Threshold,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Snapshot,
        Self::Cumulative,
        Self::Start,
        Self::Stop,
        Self::Config,
        Self::Metric,
        Self::Param,
        Self::Threshold,
    ];

    /// The wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::Cumulative => "cumulative",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Config => "config",
            Self::Metric => "metric",
            Self::Param => "param",
            Self::Threshold => "threshold",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEventKind(s.to_string()))
    }
}

/// A single dashboard event: a kind plus an opaque JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEvent {
    /// Event name.
    #[serde(rename = "event")]
    pub kind: EventKind,
    /// Payload, passed through untouched.
    pub data: serde_json::Value,
}

impl DashboardEvent {
    /// Create an event from a kind and payload.
    pub const fn new(kind: EventKind, data: serde_json::Value) -> Self {
        Self { kind, data }
    }

    /// Serialize the payload for transport.
    ///
    /// Streams carry only the payload; the kind travels as the event name.
    pub fn data_json(&self) -> String {
        self.data.to_string()
    }
}
