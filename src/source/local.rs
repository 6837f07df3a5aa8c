//! Directory-backed object store
//!
//! Maps `bucket/key` onto `{root}/{bucket}/{key}` so a run can be pointed at
//! files on disk instead of S3.

use super::ObjectStore;
use crate::error::EtlError;
use eyre::Result;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path an object resolves to
    pub fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for LocalObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key);
        log::debug!("Reading object from {}", path.display());

        tokio::fs::read(&path).await.map_err(|e| {
            EtlError::SourceUnavailable {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: format!("{}: {}", path.display(), e),
            }
            .into()
        })
    }
}
