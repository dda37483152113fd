/// Configuration management for the metadata publisher
use crate::{
    anchor::GatewayTemplate,
    error::{PublishError, PublishResult},
    registration::LicenseTerms,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub account: AccountConfig,
    pub registration: RegistrationConfig,
    pub storage: StorageConfig,
    pub metadata: MetadataSourceConfig,
    pub logging: LoggingConfig,
}

/// Network the asset is registered on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub http_timeout_secs: u64,
}

/// Account the registration is made for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub address: String,
}

/// Registration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    pub nft_contract: String,
    pub license_terms: LicenseTerms,
    /// Signing relay endpoint; dry run when unset
    pub registrar_url: Option<String>,
    pub registrar_token: Option<String>,
}

/// Content storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub gateway: GatewayTemplate,
    pub store: StoreConfig,
}

/// Content store backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreConfig {
    Pinata {
        api_url: String,
        jwt: String,
    },
    Disk {
        location: PathBuf,
    },
}

/// Optional metadata document overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSourceConfig {
    pub ip_metadata_file: Option<PathBuf>,
    pub nft_metadata_file: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = PublishError;

    fn from_str(s: &str) -> PublishResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(PublishError::Validation(format!("Unknown log format: {}", other))),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> PublishResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> PublishResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let chain_id = var("IPA_CHAIN_ID", "iliad");
        let rpc_url = var("IPA_RPC_URL", "https://testnet.storyrpc.io");
        let explorer_url = var("IPA_EXPLORER_URL", "https://explorer.story.foundation");
        let http_timeout_secs: u64 = var("IPA_HTTP_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|_| PublishError::Validation("Invalid HTTP timeout".to_string()))?;

        let address = lookup("IPA_ACCOUNT_ADDRESS")
            .ok_or_else(|| PublishError::Validation("Account address required".to_string()))?;

        let nft_contract = lookup("IPA_NFT_CONTRACT")
            .ok_or_else(|| PublishError::Validation("NFT contract address required".to_string()))?;
        let license_terms: LicenseTerms = var("IPA_LICENSE_TERMS", "non_commercial_social_remixing").parse()?;
        let registrar_url = lookup("IPA_REGISTRAR_URL").filter(|s| !s.is_empty());
        let registrar_token = lookup("IPA_REGISTRAR_TOKEN").filter(|s| !s.is_empty());

        let data_directory: PathBuf = var("IPA_DATA_DIRECTORY", "./data").into();
        let gateway = GatewayTemplate::parse(var("IPA_GATEWAY_URL_TEMPLATE", "https://ipfs.io/ipfs/{cid}"))?;

        let store = match lookup("IPA_PINATA_JWT").filter(|s| !s.is_empty()) {
            Some(jwt) => StoreConfig::Pinata {
                api_url: var("IPA_PINATA_API_URL", "https://api.pinata.cloud"),
                jwt,
            },
            None => StoreConfig::Disk {
                location: lookup("IPA_DISK_STORE_LOCATION")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| data_directory.join("metadata")),
            },
        };

        let ip_metadata_file = lookup("IPA_IP_METADATA_FILE").map(PathBuf::from);
        let nft_metadata_file = lookup("IPA_NFT_METADATA_FILE").map(PathBuf::from);

        let log_level = var("RUST_LOG", "ipa_publisher=info");
        let log_format: LogFormat = var("IPA_LOG_FORMAT", "text").parse()?;

        Ok(AppConfig {
            network: NetworkConfig {
                chain_id,
                rpc_url,
                explorer_url,
                http_timeout_secs,
            },
            account: AccountConfig { address },
            registration: RegistrationConfig {
                nft_contract,
                license_terms,
                registrar_url,
                registrar_token,
            },
            storage: StorageConfig {
                data_directory,
                gateway,
                store,
            },
            metadata: MetadataSourceConfig {
                ip_metadata_file,
                nft_metadata_file,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> PublishResult<()> {
        validate_address("Account address", &self.account.address)?;
        validate_address("NFT contract", &self.registration.nft_contract)?;

        if self.network.chain_id.is_empty() {
            return Err(PublishError::Validation("Chain id cannot be empty".to_string()));
        }

        if self.network.http_timeout_secs == 0 {
            return Err(PublishError::Validation(
                "HTTP timeout must be at least 1 second".to_string(),
            ));
        }

        if let Some(url) = &self.registration.registrar_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(PublishError::Validation(format!(
                    "Registrar URL must be http(s): {}",
                    url
                )));
            }
        }

        if let StoreConfig::Pinata { api_url, .. } = &self.storage.store {
            if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
                return Err(PublishError::Validation(format!(
                    "Pinata API URL must be http(s): {}",
                    api_url
                )));
            }
        }

        Ok(())
    }
}

/// Check an EVM address: `0x` followed by 40 hex characters
fn validate_address(label: &str, address: &str) -> PublishResult<()> {
    let digits = address
        .strip_prefix("0x")
        .ok_or_else(|| PublishError::Validation(format!("{} must start with 0x: {}", label, address)))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PublishError::Validation(format!(
            "{} must be 40 hex characters after 0x: {}",
            label, address
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000a1";
    const CONTRACT: &str = "0x00000000000000000000000000000000000000c0";

    fn load(vars: &[(&str, &str)]) -> PublishResult<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![("IPA_ACCOUNT_ADDRESS", ACCOUNT), ("IPA_NFT_CONTRACT", CONTRACT)]
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();
        config.validate().unwrap();

        assert_eq!(config.network.chain_id, "iliad");
        assert_eq!(config.network.http_timeout_secs, 30);
        assert_eq!(config.registration.license_terms, LicenseTerms::NonCommercialSocialRemixing);
        assert!(config.registration.registrar_url.is_none());
        assert_eq!(config.storage.gateway, GatewayTemplate::default());
        match &config.storage.store {
            StoreConfig::Disk { location } => assert_eq!(location, &PathBuf::from("./data/metadata")),
            other => panic!("expected disk store, got {:?}", other),
        }
        assert_eq!(config.logging.level, "ipa_publisher=info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_logging_settings() {
        let mut vars = required();
        vars.push(("RUST_LOG", "ipa_publisher=debug"));
        vars.push(("IPA_LOG_FORMAT", "JSON"));
        let config = load(&vars).unwrap();
        assert_eq!(config.logging.level, "ipa_publisher=debug");
        assert_eq!(config.logging.format, LogFormat::Json);

        let mut vars = required();
        vars.push(("IPA_LOG_FORMAT", "xml"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_pinata_selected_when_jwt_set() {
        let mut vars = required();
        vars.push(("IPA_PINATA_JWT", "secret"));
        let config = load(&vars).unwrap();

        match &config.storage.store {
            StoreConfig::Pinata { api_url, jwt } => {
                assert_eq!(api_url, "https://api.pinata.cloud");
                assert_eq!(jwt, "secret");
            }
            other => panic!("expected pinata store, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_values() {
        assert!(load(&[("IPA_NFT_CONTRACT", CONTRACT)]).is_err());
        assert!(load(&[("IPA_ACCOUNT_ADDRESS", ACCOUNT)]).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = required();
        vars.push(("IPA_LICENSE_TERMS", "public_domain"));
        assert!(load(&vars).is_err());

        let mut vars = required();
        vars.push(("IPA_GATEWAY_URL_TEMPLATE", "https://ipfs.io/ipfs/"));
        assert!(load(&vars).is_err());

        let mut vars = required();
        vars.push(("IPA_HTTP_TIMEOUT_SECS", "soon"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_validate_addresses() {
        let config = load(&[("IPA_ACCOUNT_ADDRESS", "0x123"), ("IPA_NFT_CONTRACT", CONTRACT)]).unwrap();
        assert!(config.validate().is_err());

        let config = load(&[("IPA_ACCOUNT_ADDRESS", ACCOUNT), ("IPA_NFT_CONTRACT", "c0ffee")]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut vars = required();
        vars.push(("IPA_HTTP_TIMEOUT_SECS", "0"));
        let config = load(&vars).unwrap();
        assert!(config.validate().is_err());
    }
}
