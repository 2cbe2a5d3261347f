//! Shared router state.

use std::sync::Arc;

use dashgate_core::DefaultLanguage;

use crate::inject::AssetInjector;
use crate::stream::EventStream;

/// Handler dependencies, built once per router and read-only afterwards.
pub struct GatewayContext {
    /// UI asset server.
    pub injector: AssetInjector,
    /// Event-stream collaborator.
    pub events: Arc<dyn EventStream>,
    /// Default language for root redirects.
    pub lang: DefaultLanguage,
}

/// State shared across all handlers.
pub type AppState = Arc<GatewayContext>;
