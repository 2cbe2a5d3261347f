//! Directory-backed asset source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::{AssetError, AssetSource};

/// Serves assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Create a source rooted at `root`. The directory is not checked until
    /// the first read.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for DirAssets {
    async fn read(&self, key: &str) -> Result<Bytes, AssetError> {
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound(key.to_string())),
            Err(source) => Err(AssetError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
