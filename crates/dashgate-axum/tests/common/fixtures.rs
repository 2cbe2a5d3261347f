//! Test collaborators and assets.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, any};
use dashgate_axum::{AssetSource, EventStream, MemoryAssets, RouterDeps};
use dashgate_core::DefaultLanguage;

pub const INDEX_HTML: &str =
    "<!doctype html><html><head><title>dashboard</title></head><body></body></html>";
pub const APP_JS: &str = "import('./chunk.js'); const tag = '<head>';";
pub const STYLE_CSS: &str = "body { margin: 0 }";

/// Event stream that records how it was used.
#[derive(Debug, Default)]
pub struct RecordingStream {
    served: AtomicUsize,
    closed: AtomicUsize,
}

impl RecordingStream {
    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventStream for RecordingStream {
    async fn serve(&self, _request: Request) -> Response {
        self.served.fetch_add(1, Ordering::SeqCst);
        (StatusCode::OK, "stream").into_response()
    }

    fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Report handler that counts its calls.
pub fn counting_report(calls: Arc<AtomicUsize>) -> MethodRouter {
    any(move || {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            "report"
        }
    })
}

pub fn ui_assets() -> Arc<dyn AssetSource> {
    Arc::new(
        MemoryAssets::new()
            .with_file("index.html", INDEX_HTML)
            .with_file("assets/app.js", APP_JS)
            .with_file("assets/style.css", STYLE_CSS),
    )
}

/// Router dependencies plus handles to observe the collaborators.
pub struct Harness {
    pub deps: RouterDeps,
    pub events: Arc<RecordingStream>,
    pub report_calls: Arc<AtomicUsize>,
}

pub fn harness(lang: &str) -> Harness {
    let events = Arc::new(RecordingStream::default());
    let report_calls = Arc::new(AtomicUsize::new(0));
    let deps = RouterDeps {
        assets: ui_assets(),
        events: events.clone(),
        report: counting_report(Arc::clone(&report_calls)),
        lang: DefaultLanguage::new(lang).unwrap(),
    };
    Harness {
        deps,
        events,
        report_calls,
    }
}
