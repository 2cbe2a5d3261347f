//! UI asset serving with runtime configuration injection.
//!
//! HTML entry documents get a small inline script right after the first
//! `<head>` tag so the UI knows the server's default language before any of
//! its own code runs:
//!
//! ```html
//! <head>
//! <script>window.__DASHBOARD_LANG__='en';</script>
//! ```
//!
//! The search is a plain byte-substring match, not an HTML parse. A `<head>`
//! inside a comment or attribute value receives the snippet too.

use std::borrow::Cow;
use std::sync::Arc;

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use dashgate_core::DefaultLanguage;
use tracing::debug;

use crate::assets::{AssetSource, asset_key};
use crate::error::HttpError;

/// Tag the configuration snippet is inserted after.
pub const HEAD_TAG: &[u8] = b"<head>";

/// Global the UI reads its bootstrap language from.
pub const LANG_GLOBAL: &str = "__DASHBOARD_LANG__";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Build the inline script carrying the default language.
///
/// Returns `None` when no language is configured, in which case nothing is
/// injected.
pub fn language_snippet(lang: &DefaultLanguage) -> Option<String> {
    lang.tag()
        .map(|tag| format!("\n<script>window.{LANG_GLOBAL}='{tag}';</script>\n"))
}

/// Insert `insert` immediately after the first occurrence of `tag`.
///
/// Content without the tag is returned borrowed and untouched.
pub fn inject_after<'a>(html: &'a [u8], tag: &[u8], insert: &[u8]) -> Cow<'a, [u8]> {
    let Some(idx) = find(html, tag) else {
        return Cow::Borrowed(html);
    };
    let split = idx + tag.len();

    let mut out = Vec::with_capacity(html.len() + insert.len());
    out.extend_from_slice(&html[..split]);
    out.extend_from_slice(insert);
    out.extend_from_slice(&html[split..]);
    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Whether a UI-relative path is served as an HTML document.
pub fn is_html_path(path: &str) -> bool {
    path.is_empty() || path == "/" || path.ends_with(".html")
}

/// Serves UI files, inlining the language snippet into HTML documents.
#[derive(Clone)]
pub struct AssetInjector {
    source: Arc<dyn AssetSource>,
    snippet: Option<Bytes>,
}

impl AssetInjector {
    pub fn new(source: Arc<dyn AssetSource>, lang: &DefaultLanguage) -> Self {
        Self {
            source,
            snippet: language_snippet(lang).map(Bytes::from),
        }
    }

    /// Serve a path relative to the UI root.
    pub async fn serve(&self, path: &str) -> Response {
        match self.try_serve(path).await {
            Ok(response) => response,
            Err(err) => {
                debug!(path = %path, error = %err, "UI asset not served");
                err.into_response()
            }
        }
    }

    async fn try_serve(&self, path: &str) -> Result<Response, HttpError> {
        let key = asset_key(path)?;
        let content = self.source.read(&key).await?;

        if is_html_path(path) {
            let body = self.inject(content);
            return Ok((
                [(header::CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE))],
                body,
            )
                .into_response());
        }

        let mime = mime_guess::from_path(&key).first_or_octet_stream();
        let content_type = HeaderValue::from_str(mime.as_ref())
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
        Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
    }

    fn inject(&self, content: Bytes) -> Bytes {
        let Some(snippet) = &self.snippet else {
            return content;
        };
        let injected = match inject_after(&content, HEAD_TAG, snippet) {
            Cow::Borrowed(_) => None,
            Cow::Owned(injected) => Some(injected),
        };
        injected.map_or(content, Bytes::from)
    }
}
