/// In-memory content store
use crate::{
    error::PublishResult,
    store::{local_locator, ContentStore},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Keeps content in process memory, keyed by locally derived locator
#[derive(Default)]
pub struct InMemoryContentStore {
    content: RwLock<HashMap<String, Vec<u8>>>,
    puts: AtomicUsize,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, locator: &str) -> Option<Vec<u8>> {
        self.content.read().await.get(locator).cloned()
    }

    /// Number of distinct documents held
    pub async fn len(&self) -> usize {
        self.content.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.content.read().await.is_empty()
    }

    /// Number of `put` calls received, including duplicates
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, name: &str, content: Vec<u8>) -> PublishResult<String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let locator = local_locator(&content);
        debug!("Stored {} in memory as {}", name, locator);
        self.content.write().await.insert(locator.clone(), content);
        Ok(locator)
    }
}
