//! UI asset sources.
//!
//! The gateway reads UI files through [`AssetSource`], a read-only store keyed
//! by slash-separated paths. Two stores ship with the crate:
//!
//! - [`DirAssets`] - files under a directory on disk
//! - [`MemoryAssets`] - an in-memory map (embedded bundles, tests)

mod dir;
mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use dir::DirAssets;
pub use memory::MemoryAssets;

/// Key served for the UI root.
pub const INDEX_FILE: &str = "index.html";

/// Errors from reading an asset. All of them are reported to clients as 404.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset exists under the key.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The key escapes the store or is otherwise unusable.
    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    /// The backing store failed.
    #[error("Failed to read asset {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only hierarchical byte store the UI is served from.
#[async_trait]
pub trait AssetSource: Send + Sync + 'static {
    /// Read the full content stored under `key`.
    ///
    /// Keys are normalized by [`asset_key`] before reaching this method.
    async fn read(&self, key: &str) -> Result<Bytes, AssetError>;
}

/// Map a UI-relative request path to a store key.
///
/// The empty path and `/` resolve to [`INDEX_FILE`]. A leading `/` is
/// stripped. Parent segments, backslashes and NUL bytes are rejected.
pub fn asset_key(path: &str) -> Result<String, AssetError> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Ok(INDEX_FILE.to_string());
    }

    let invalid = trimmed.contains('\\')
        || trimmed.contains('\0')
        || trimmed.split('/').any(|segment| segment == "..");
    if invalid {
        return Err(AssetError::InvalidPath(path.to_string()));
    }

    Ok(trimmed.to_string())
}
