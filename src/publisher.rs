/// Metadata Publisher
///
/// Canonicalizes a document, fingerprints it and uploads the exact same
/// bytes to a content store.
use crate::{
    document::MetadataDocument,
    error::PublishResult,
    fingerprint::Fingerprint,
    metrics,
    store::ContentStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a single publication
///
/// Immutable; ownership passes entirely to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationResult {
    locator: String,
    fingerprint: Fingerprint,
}

impl PublicationResult {
    pub fn new(locator: String, fingerprint: Fingerprint) -> Self {
        Self { locator, fingerprint }
    }

    /// Where the store put the document
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// SHA-256 of the canonical document bytes
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

/// Publishes metadata documents to a content store
#[derive(Clone)]
pub struct MetadataPublisher {
    store: Arc<dyn ContentStore>,
}

impl MetadataPublisher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Publish a document
    ///
    /// One store write per call. No retries and no caching.
    pub async fn publish(&self, document: &MetadataDocument) -> PublishResult<PublicationResult> {
        let store = self.store.name();
        let started = Instant::now();

        let bytes = match document.canonical_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                metrics::record_publication(store, e.kind(), started.elapsed().as_secs_f64(), 0);
                return Err(e);
            }
        };

        let fingerprint = Fingerprint::of_bytes(&bytes);
        let name = format!("metadata-{}.json", &fingerprint.as_hex()[..16]);
        let size = bytes.len();

        debug!("Publishing {} ({} bytes) to {} store", name, size, store);

        match self.store.put(&name, bytes).await {
            Ok(locator) => {
                metrics::record_publication(store, "success", started.elapsed().as_secs_f64(), size);
                info!("Published {} as {} (fingerprint {})", name, locator, fingerprint);
                Ok(PublicationResult::new(locator, fingerprint))
            }
            Err(e) => {
                metrics::record_publication(store, e.kind(), started.elapsed().as_secs_f64(), 0);
                warn!("Failed to publish {}: {}", name, e);
                Err(e)
            }
        }
    }

    /// Convert a serializable value and publish it
    ///
    /// Serialization failures surface before the store is contacted.
    pub async fn publish_serializable<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> PublishResult<PublicationResult> {
        let document = MetadataDocument::from_serializable(value)?;
        self.publish(&document).await
    }

    /// Check retrieved content against a publication's fingerprint
    pub fn verify(result: &PublicationResult, content: &[u8]) -> bool {
        result.fingerprint().matches(content)
    }
}
