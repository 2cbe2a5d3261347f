//! Route definitions and router construction.
//!
//! | Path | Handler |
//! |---|---|
//! | `/events` | event-stream collaborator |
//! | `/ui/` | asset injector, prefix stripped |
//! | `/report` | report collaborator, any method |
//! | anything else | root redirect for `/`, 404 otherwise |

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use dashgate_core::DefaultLanguage;
use tower_http::trace::TraceLayer;

use crate::assets::AssetSource;
use crate::inject::AssetInjector;
use crate::redirect::redirect_root;
use crate::state::{AppState, GatewayContext};
use crate::stream::EventStream;

/// Event-stream endpoint.
pub const PATH_EVENTS: &str = "/events";
/// UI subtree prefix.
pub const PATH_UI: &str = "/ui/";
/// Report endpoint.
pub const PATH_REPORT: &str = "/report";

/// Collaborators the router dispatches to.
pub struct RouterDeps {
    /// UI asset store.
    pub assets: Arc<dyn AssetSource>,
    /// Event-stream collaborator.
    pub events: Arc<dyn EventStream>,
    /// Report handler, mounted for every method.
    pub report: MethodRouter,
    /// Default language for injection and redirects.
    pub lang: DefaultLanguage,
}

/// Build the gateway router.
pub fn create_router(deps: RouterDeps) -> Router {
    let RouterDeps {
        assets,
        events,
        report,
        lang,
    } = deps;

    let state: AppState = Arc::new(GatewayContext {
        injector: AssetInjector::new(assets, &lang),
        events,
        lang,
    });

    let ui_root = PATH_UI.trim_end_matches('/');

    Router::new()
        .route(PATH_EVENTS, get(events_stream))
        .route(ui_root, get(ui_add_slash))
        .route(PATH_UI, get(ui_index))
        .route(&format!("{PATH_UI}{{*path}}"), get(ui_asset))
        .fallback(root)
        .with_state(state)
        .route(PATH_REPORT, report)
        .layer(TraceLayer::new_for_http())
}

async fn events_stream(State(state): State<AppState>, request: Request) -> Response {
    state.events.serve(request).await
}

async fn ui_index(State(state): State<AppState>) -> Response {
    state.injector.serve("").await
}

async fn ui_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    state.injector.serve(&path).await
}

/// `/ui` without the trailing slash moves permanently to `/ui/`, keeping the
/// query so a redirected root visit arrives intact.
async fn ui_add_slash(uri: Uri) -> Response {
    let location = match uri.query() {
        Some(query) => format!("{PATH_UI}?{query}"),
        None => PATH_UI.to_string(),
    };
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}

async fn root(State(state): State<AppState>, uri: Uri) -> Response {
    redirect_root(PATH_UI, &uri, &state.lang)
}
