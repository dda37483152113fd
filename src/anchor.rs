/// Turning publication results into on-chain metadata anchors
use crate::{
    error::{PublishError, PublishResult},
    publisher::PublicationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by the locator in gateway templates
pub const LOCATOR_PLACEHOLDER: &str = "{cid}";

/// Gateway URL template, e.g. `https://ipfs.io/ipfs/{cid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTemplate(String);

impl GatewayTemplate {
    pub fn parse(template: impl Into<String>) -> PublishResult<Self> {
        let template = template.into();
        if !template.contains(LOCATOR_PLACEHOLDER) {
            return Err(PublishError::Validation(format!(
                "Gateway template must contain {}: {}",
                LOCATOR_PLACEHOLDER, template
            )));
        }
        if !(template.starts_with("https://") || template.starts_with("http://") || template.starts_with("ipfs://")) {
            return Err(PublishError::Validation(format!(
                "Gateway template must be an http(s) or ipfs URL: {}",
                template
            )));
        }
        Ok(Self(template))
    }

    /// Build the browsable URI for a locator
    pub fn resolve(&self, locator: &str) -> String {
        self.0.replace(LOCATOR_PLACEHOLDER, locator)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GatewayTemplate {
    fn default() -> Self {
        Self("https://ipfs.io/ipfs/{cid}".to_string())
    }
}

impl fmt::Display for GatewayTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata URI and hash pair as recorded on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredMetadata {
    pub uri: String,
    /// `0x`-prefixed SHA-256 hex
    pub hash: String,
}

impl AnchoredMetadata {
    /// Anchor a publication; the pair is passed through unmodified
    pub fn from_publication(result: &PublicationResult, gateway: &GatewayTemplate) -> Self {
        Self {
            uri: gateway.resolve(result.locator()),
            hash: result.fingerprint().to_prefixed_hex(),
        }
    }
}
