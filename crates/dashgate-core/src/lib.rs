//! Core domain types and port definitions for dashgate.
//!
//! This crate holds the vocabulary shared by every adapter: the dashboard
//! event model, the event emitter port, and the default-language setting.
//! It has no knowledge of HTTP; transport lives in `dashgate-axum`.

#![deny(unused_crate_dependencies)]

pub mod error;
pub mod events;
pub mod language;
pub mod ports;

pub use error::CoreError;
pub use events::{DashboardEvent, EVENT_CHANNEL, EventKind, parse_recording};
pub use language::DefaultLanguage;
pub use ports::{EventEmitter, NoopEmitter};
