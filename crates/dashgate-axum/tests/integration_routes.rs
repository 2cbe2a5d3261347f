//! Integration tests for the gateway router.
//!
//! These tests drive the router in-process and verify each path reaches the
//! right handler with the right response shape.

mod common;

use std::sync::atomic::Ordering;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::fixtures::{APP_JS, INDEX_HTML, STYLE_CSS, harness};
use dashgate_axum::create_router;

const EN_SNIPPET: &str = "\n<script>window.__DASHBOARD_LANG__='en';</script>\n";

async fn send(app: Router, method: Method, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn root_redirects_into_ui_with_lang_and_endpoint() {
    let app = create_router(harness("en").deps);

    let response = send(app, Method::GET, "/").await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/ui?lang=en&endpoint=/");
}

#[tokio::test]
async fn root_redirect_preserves_query_and_existing_lang() {
    let app = create_router(harness("en").deps);

    let response = send(app.clone(), Method::GET, "/?foo=1").await;
    assert_eq!(location(&response), "/ui?foo=1&lang=en&endpoint=/");

    let response = send(app, Method::GET, "/?lang=fr").await;
    assert_eq!(location(&response), "/ui?lang=fr&endpoint=/");
}

#[tokio::test]
async fn root_redirect_without_default_lang() {
    let app = create_router(harness("").deps);

    let response = send(app, Method::GET, "/").await;
    assert_eq!(location(&response), "/ui?endpoint=/");
}

#[tokio::test]
async fn ui_without_slash_moves_to_subtree() {
    let app = create_router(harness("en").deps);

    let response = send(app, Method::GET, "/ui?lang=en&endpoint=/").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&response), "/ui/?lang=en&endpoint=/");
}

#[tokio::test]
async fn ui_root_serves_index_with_injected_lang() {
    let app = create_router(harness("en").deps);

    let response = send(app, Method::GET, "/ui/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    let expected = INDEX_HTML.replacen("<head>", &format!("<head>{EN_SNIPPET}"), 1);
    assert_eq!(body_string(response).await, expected);
}

#[tokio::test]
async fn ui_html_file_is_injected() {
    let app = create_router(harness("en").deps);

    let response = send(app, Method::GET, "/ui/index.html").await;

    let body = body_string(response).await;
    assert!(body.starts_with("<!doctype html><html><head>\n<script>"));
    assert_eq!(body.matches("__DASHBOARD_LANG__").count(), 1);
}

#[tokio::test]
async fn ui_html_without_lang_is_byte_identical() {
    let app = create_router(harness("").deps);

    let response = send(app, Method::GET, "/ui/index.html").await;
    assert_eq!(body_string(response).await, INDEX_HTML);
}

#[tokio::test]
async fn ui_static_assets_are_not_rewritten() {
    let app = create_router(harness("en").deps);

    let response = send(app.clone(), Method::GET, "/ui/assets/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(!content_type.starts_with("text/html"), "{content_type}");
    assert_eq!(body_string(response).await, APP_JS);

    let response = send(app, Method::GET, "/ui/assets/style.css").await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(body_string(response).await, STYLE_CSS);
}

#[tokio::test]
async fn ui_missing_file_is_404() {
    let app = create_router(harness("en").deps);

    let response = send(app.clone(), Method::GET, "/ui/missing.html").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(app, Method::GET, "/ui/assets/missing.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ui_head_request_has_no_body() {
    let app = create_router(harness("en").deps);

    let response = send(app, Method::HEAD, "/ui/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn events_are_delegated_to_stream() {
    let h = harness("en");
    let events = h.events.clone();
    let app = create_router(h.deps);

    let response = send(app, Method::GET, "/events").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "stream");
    assert_eq!(events.served(), 1);
}

#[tokio::test]
async fn report_accepts_any_method() {
    let h = harness("en");
    let calls = h.report_calls.clone();
    let app = create_router(h.deps);

    for method in [Method::GET, Method::POST, Method::DELETE] {
        let response = send(app.clone(), method, "/report").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn unregistered_paths_are_404_without_side_effects() {
    let h = harness("en");
    let events = h.events.clone();
    let calls = h.report_calls.clone();
    let app = create_router(h.deps);

    for uri in ["/nope", "/favicon.ico", "/events/extra", "/reports", "/uix"] {
        let response = send(app.clone(), Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_string(response).await, "404 page not found\n");
    }

    assert_eq!(events.served(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
