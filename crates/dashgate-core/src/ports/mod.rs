//! Port definitions (trait abstractions) for external systems.
//!
//! Ports use only domain types; transports implement them in adapter crates.

pub mod event_emitter;

pub use event_emitter::{EventEmitter, NoopEmitter};
