//! Root-path redirect normalization.
//!
//! A bare visit to `/` is sent into the UI with a canonical query string: the
//! caller's own parameters first, then `lang` if the caller did not choose
//! one, then `endpoint` telling the UI where the event stream is mounted.

use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use dashgate_core::DefaultLanguage;

use crate::error::HttpError;

/// Compute the redirect query for a root visit.
///
/// `path` is the original request path and becomes the `endpoint` value.
pub fn normalize_query(raw_query: &str, path: &str, lang: &DefaultLanguage) -> String {
    let mut query = raw_query.to_string();

    if let Some(tag) = lang.tag() {
        if query.is_empty() {
            query = format!("lang={tag}");
        } else if !has_lang_param(&query) {
            query.push_str("&lang=");
            query.push_str(tag);
        }
    }

    if !query.is_empty() {
        query.push('&');
    }
    query.push_str("endpoint=");
    query.push_str(path);
    query
}

/// Naive check for a `lang` parameter.
///
/// This is a substring search, so `otherlang=x` also counts.
pub fn has_lang_param(raw_query: &str) -> bool {
    raw_query.contains("lang=")
}

/// Join the UI root with a request path, cleaning duplicate and trailing
/// slashes. `join_ui_path("/ui/", "/")` is `/ui`.
pub fn join_ui_path(ui_root: &str, path: &str) -> String {
    let segments: Vec<&str> = ui_root
        .split('/')
        .chain(path.split('/'))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    format!("/{}", segments.join("/"))
}

/// Compute `(redirect_path, redirect_query)` for a root visit.
pub fn normalize(
    ui_root: &str,
    path: &str,
    raw_query: &str,
    lang: &DefaultLanguage,
) -> (String, String) {
    (
        join_ui_path(ui_root, path),
        normalize_query(raw_query, path, lang),
    )
}

/// Redirect `/` into the UI; every other path is not found.
pub fn redirect_root(ui_root: &str, uri: &Uri, lang: &DefaultLanguage) -> Response {
    if uri.path() != "/" {
        return HttpError::NotFound(uri.path().to_string()).into_response();
    }

    let (path, query) = normalize(ui_root, uri.path(), uri.query().unwrap_or_default(), lang);
    Redirect::temporary(&format!("{path}?{query}")).into_response()
}
