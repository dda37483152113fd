/// Pinata IPFS pinning backend
use crate::{
    error::{PublishError, PublishResult},
    store::ContentStore,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info};

/// Configuration for the Pinata pinning API
#[derive(Debug, Clone)]
pub struct PinataConfig {
    /// API base URL (e.g., "https://api.pinata.cloud")
    pub api_url: String,

    /// JWT used as bearer token
    pub jwt: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.pinata.cloud".to_string(),
            jwt: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Response body of `pinFileToIPFS`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinResponse {
    ipfs_hash: String,
    #[serde(default)]
    pin_size: Option<u64>,
}

/// Pinata store
///
/// Uploads the canonical bytes as a file so the pinned content is
/// byte-identical to what was fingerprinted.
#[derive(Clone)]
pub struct PinataStore {
    http_client: Client,
    config: PinataConfig,
}

impl PinataStore {
    /// Create a new Pinata store
    pub fn new(config: PinataConfig) -> PublishResult<Self> {
        info!("Initializing Pinata content store ({})", config.api_url);

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishError::Validation(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, config })
    }

    fn pin_file_url(&self) -> String {
        format!("{}/pinning/pinFileToIPFS", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ContentStore for PinataStore {
    fn name(&self) -> &'static str {
        "pinata"
    }

    async fn put(&self, name: &str, content: Vec<u8>) -> PublishResult<String> {
        let url = self.pin_file_url();
        debug!("Pinning {} to Pinata ({} bytes)", name, content.len());

        let file = Part::bytes(content)
            .file_name(name.to_string())
            .mime_str("application/json")
            .map_err(|e| PublishError::StoreUnavailable(format!("Invalid upload part: {}", e)))?;
        let form = Form::new()
            .part("file", file)
            .text("pinataMetadata", json!({ "name": name }).to_string());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach Pinata: {}", e);
                PublishError::StoreUnavailable(format!("Pinata upload failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Pinata rejected upload of {}: {} {}", name, status, body);
            return Err(PublishError::StoreUnavailable(format!(
                "Pinata returned {}: {}",
                status, body
            )));
        }

        let pinned: PinResponse = response.json().await.map_err(|e| {
            PublishError::StoreUnavailable(format!("Invalid Pinata response: {}", e))
        })?;

        debug!(
            "✓ Pinned {} as {} ({} bytes)",
            name,
            pinned.ipfs_hash,
            pinned.pin_size.unwrap_or_default()
        );
        Ok(pinned.ipfs_hash)
    }
}
