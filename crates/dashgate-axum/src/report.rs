//! Report endpoint collaborators.
//!
//! The gateway treats the report handler as opaque: any `MethodRouter` can be
//! mounted on the report path. These helpers cover the common cases.

use std::path::Path;

use axum::routing::{MethodRouter, any, any_service};
use tower_http::services::ServeFile;

use crate::error::HttpError;

/// A report handler that answers every request with 404.
///
/// Used when no report is available yet.
pub fn unavailable() -> MethodRouter {
    any(|| async { HttpError::NotFound("no report configured".to_string()) })
}

/// Serve a pre-rendered report file (usually a self-contained HTML page).
pub fn from_file(path: impl AsRef<Path>) -> MethodRouter {
    any_service(ServeFile::new(path))
}
