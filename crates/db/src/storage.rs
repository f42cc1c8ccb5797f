//! Object storage for vendor portfolio images.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;
use wedplan_core::types::UserId;

use crate::error::StoreError;

/// Bucket holding vendor portfolio images.
pub const PORTFOLIO_BUCKET: &str = "vendor-portfolios";

/// File upload and public URL retrieval.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Public URL for an object. Does not check that the object exists.
    fn public_url(&self, bucket: &str, key: &str) -> String;

    /// Remove objects. Keys that do not exist are ignored.
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StoreError>;
}

/// Object key for a new portfolio image: `<user_id>/<uuid>.<ext>`.
pub fn portfolio_key(user_id: UserId, file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or("bin")
        .to_ascii_lowercase();
    format!("{user_id}/{}.{ext}", Uuid::new_v4())
}

/// Recover the object key from a public URL produced for `bucket`.
pub fn key_from_public_url(url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/{bucket}/");
    url.find(&marker)
        .map(|i| &url[i + marker.len()..])
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Local disk
// ---------------------------------------------------------------------------

/// Stores objects under `<root>/<bucket>/<key>` and serves them from
/// `<public_base>/<bucket>/<key>`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(bucket).join(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || key.is_empty() {
            return Err(StoreError::InvalidQuery(format!("invalid object key '{key}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), "Stored object");
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.public_base.trim_end_matches('/'))
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), StoreError> {
        for key in keys {
            let path = self.object_path(bucket, key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
