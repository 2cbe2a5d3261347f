//! Axum HTTP gateway for the dashgate dashboard.
//!
//! One listener multiplexes four concerns:
//!
//! - `/events` - live event stream (delegated to an [`EventStream`])
//! - `/ui/` - UI assets, with the default language inlined into HTML
//! - `/report` - report handler (any `MethodRouter`)
//! - `/` - redirect into the UI with a canonical query string
//!
//! [`Gateway`] owns the router and the listen/stop lifecycle.
//! [`SseBroadcaster`] is the bundled event-stream implementation.

#![deny(unsafe_code)]

pub mod assets;
pub mod error;
pub mod gateway;
pub mod inject;
pub mod redirect;
pub mod report;
pub mod routes;
pub mod sse;
pub mod state;
pub mod stream;

// Re-export primary types
pub use assets::{AssetError, AssetSource, DirAssets, MemoryAssets};
pub use error::{GatewayError, HttpError};
pub use gateway::{Gateway, GatewayOptions, LifecycleState};
pub use inject::AssetInjector;
pub use routes::{PATH_EVENTS, PATH_REPORT, PATH_UI, RouterDeps, create_router};
pub use sse::{SseBroadcaster, create_broadcaster};
pub use stream::EventStream;
