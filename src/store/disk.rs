/// Disk-based content store
use crate::{
    error::{PublishError, PublishResult},
    store::{local_locator, ContentStore, LOCAL_LOCATOR_PREFIX},
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Disk storage backend
///
/// Stores documents on the local filesystem with directory sharding
/// based on the digest part of the locator.
#[derive(Clone)]
pub struct DiskContentStore {
    base_path: PathBuf,
}

impl DiskContentStore {
    /// Create a new disk store
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the file path for a locator
    ///
    /// Uses directory sharding: {base}/{first2digestchars}/{locator}
    /// For example, "bafkreicecn..." -> {base}/ce/bafkreicecn...
    fn get_content_path(&self, locator: &str) -> PathBuf {
        let digest = locator.strip_prefix(LOCAL_LOCATOR_PREFIX).unwrap_or(locator);
        if digest.len() >= 2 {
            self.base_path.join(&digest[0..2]).join(locator)
        } else {
            self.base_path.join("_").join(locator)
        }
    }

    /// Ensure the directory for a locator exists
    async fn ensure_content_dir(&self, locator: &str) -> PublishResult<PathBuf> {
        let path = self.get_content_path(locator);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                PublishError::StoreUnavailable(format!("Failed to create content directory: {}", e))
            })?;
        }
        Ok(path)
    }

    /// Retrieve stored content by locator
    pub async fn get(&self, locator: &str) -> PublishResult<Option<Vec<u8>>> {
        let path = self.get_content_path(locator);

        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PublishError::StoreUnavailable(format!(
                "Failed to read content {}: {}",
                locator, e
            ))),
        }
    }

    /// Check if content exists
    pub async fn exists(&self, locator: &str) -> bool {
        fs::try_exists(self.get_content_path(locator)).await.unwrap_or(false)
    }
}

#[async_trait]
impl ContentStore for DiskContentStore {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn put(&self, name: &str, content: Vec<u8>) -> PublishResult<String> {
        let locator = local_locator(&content);
        let path = self.ensure_content_dir(&locator).await?;

        fs::write(&path, content).await.map_err(|e| {
            PublishError::StoreUnavailable(format!("Failed to write content {}: {}", locator, e))
        })?;

        debug!("Stored {} on disk as {}", name, locator);
        Ok(locator)
    }
}
