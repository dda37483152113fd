/// IP asset registration collaborator
///
/// The core never signs or submits transactions itself. It hands the
/// anchored metadata to a `Registrar` and passes the receipt through.
use crate::{
    anchor::AnchoredMetadata,
    canonical,
    error::{PublishError, PublishResult},
    fingerprint::Fingerprint,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Licensing terms attached at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseTerms {
    /// Free remixing with attribution, no commercial use
    #[default]
    NonCommercialSocialRemixing,
    /// Commercial use without derivatives
    CommercialUse,
    /// Commercial use with derivatives and revenue share
    CommercialRemix,
}

impl LicenseTerms {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseTerms::NonCommercialSocialRemixing => "non_commercial_social_remixing",
            LicenseTerms::CommercialUse => "commercial_use",
            LicenseTerms::CommercialRemix => "commercial_remix",
        }
    }
}

impl fmt::Display for LicenseTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseTerms {
    type Err = PublishError;

    fn from_str(s: &str) -> PublishResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "non_commercial_social_remixing" | "non_commercial_remix" => {
                Ok(LicenseTerms::NonCommercialSocialRemixing)
            }
            "commercial_use" => Ok(LicenseTerms::CommercialUse),
            "commercial_remix" => Ok(LicenseTerms::CommercialRemix),
            other => Err(PublishError::Validation(format!(
                "Unknown license terms: {}",
                other
            ))),
        }
    }
}

/// Metadata anchors for both documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAnchors {
    #[serde(rename = "ipMetadataURI")]
    pub ip_metadata_uri: String,
    #[serde(rename = "ipMetadataHash")]
    pub ip_metadata_hash: String,
    #[serde(rename = "nftMetadataURI")]
    pub nft_metadata_uri: String,
    #[serde(rename = "nftMetadataHash")]
    pub nft_metadata_hash: String,
}

impl MetadataAnchors {
    pub fn new(ip: &AnchoredMetadata, nft: &AnchoredMetadata) -> Self {
        Self {
            ip_metadata_uri: ip.uri.clone(),
            ip_metadata_hash: ip.hash.clone(),
            nft_metadata_uri: nft.uri.clone(),
            nft_metadata_hash: nft.hash.clone(),
        }
    }
}

/// Mint + register + attach terms request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub nft_contract: String,
    pub license_terms: LicenseTerms,
    pub ip_metadata: MetadataAnchors,
    pub account: String,
    pub chain_id: String,
    pub rpc_url: String,
    pub wait_for_transaction: bool,
}

/// Opaque confirmation returned by a registrar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub tx_hash: String,
    pub ip_id: String,
}

/// Registration backend trait
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Registrar name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Whether receipts come from a submitted transaction
    fn submits_transactions(&self) -> bool {
        true
    }

    async fn register(&self, request: &RegistrationRequest) -> PublishResult<RegistrationReceipt>;
}

/// HTTP registrar configuration
#[derive(Debug, Clone)]
pub struct HttpRegistrarConfig {
    /// Endpoint receiving the JSON request
    pub endpoint: String,

    /// Optional bearer token
    pub token: Option<String>,

    pub timeout: Duration,
}

/// Forwards registration requests to a signing relay over HTTP
#[derive(Clone)]
pub struct HttpRegistrar {
    http_client: Client,
    config: HttpRegistrarConfig,
}

impl HttpRegistrar {
    pub fn new(config: HttpRegistrarConfig) -> PublishResult<Self> {
        info!("Initializing HTTP registrar ({})", config.endpoint);

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishError::Validation(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, config })
    }
}

#[async_trait]
impl Registrar for HttpRegistrar {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn register(&self, request: &RegistrationRequest) -> PublishResult<RegistrationReceipt> {
        debug!(
            "Submitting registration for contract {} to {}",
            request.nft_contract, self.config.endpoint
        );

        let mut builder = self.http_client.post(&self.config.endpoint).json(request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!("Failed to reach registrar: {}", e);
            if e.is_timeout() {
                PublishError::RegistrationFailed(format!("Registrar timed out: {}", e))
            } else {
                PublishError::RegistrationFailed(format!("Registrar request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Registrar rejected request: {} {}", status, body);
            return Err(PublishError::RegistrationFailed(format!(
                "Registrar returned {}: {}",
                status, body
            )));
        }

        let receipt: RegistrationReceipt = response.json().await.map_err(|e| {
            PublishError::RegistrationFailed(format!("Invalid registrar response: {}", e))
        })?;

        info!("✓ Registered IP asset {} (tx {})", receipt.ip_id, receipt.tx_hash);
        Ok(receipt)
    }
}

/// Registrar that performs no I/O
///
/// Returns identifiers derived from the canonical request bytes, so the
/// same request always yields the same receipt.
#[derive(Debug, Clone, Default)]
pub struct DryRunRegistrar;

impl DryRunRegistrar {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Registrar for DryRunRegistrar {
    fn name(&self) -> &'static str {
        "dry_run"
    }

    fn submits_transactions(&self) -> bool {
        false
    }

    async fn register(&self, request: &RegistrationRequest) -> PublishResult<RegistrationReceipt> {
        let bytes = canonical::canonicalize(request)?;

        let tx_hash = Fingerprint::of_bytes(&bytes).to_prefixed_hex();

        let mut ip_seed = b"ip:".to_vec();
        ip_seed.extend_from_slice(&bytes);
        let ip_hex = Fingerprint::of_bytes(&ip_seed).as_hex();
        let ip_id = format!("0x{}", &ip_hex[..40]);

        info!("Dry run: skipping on-chain registration for {}", request.nft_contract);
        Ok(RegistrationReceipt { tx_hash, ip_id })
    }
}
