//! In-memory asset source.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use super::{AssetError, AssetSource};

/// Serves assets from an in-memory map.
///
/// Useful for bundles compiled into the binary and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Bytes>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous content under the same key.
    #[must_use]
    pub fn with_file(mut self, key: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(key, content);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<Bytes>) {
        self.files.insert(key.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryAssets
where
    K: Into<String>,
    V: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl AssetSource for MemoryAssets {
    async fn read(&self, key: &str) -> Result<Bytes, AssetError> {
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(key.to_string()))
    }
}
