/// Application context and dependency injection
use crate::{
    config::{AppConfig, StoreConfig},
    error::PublishResult,
    publisher::MetadataPublisher,
    registration::{DryRunRegistrar, HttpRegistrar, HttpRegistrarConfig, Registrar},
    store::{ContentStore, ContentStoreType, DiskContentStore, InMemoryContentStore, PinataConfig, PinataStore},
    workflow::RegistrationSettings,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub publisher: MetadataPublisher,
    pub registrar: Arc<dyn Registrar>,
    pub settings: RegistrationSettings,
}

impl AppContext {
    /// Create a new application context from configuration
    pub fn new(config: AppConfig) -> PublishResult<Self> {
        // Validate configuration
        config.validate()?;

        let timeout = Duration::from_secs(config.network.http_timeout_secs);

        // Initialize content store
        let store_type = match &config.storage.store {
            StoreConfig::Pinata { api_url, jwt } => ContentStoreType::Pinata(PinataConfig {
                api_url: api_url.clone(),
                jwt: jwt.clone(),
                timeout,
            }),
            StoreConfig::Disk { location } => ContentStoreType::Disk {
                location: location.clone(),
            },
        };
        let store = build_store(store_type)?;
        let publisher = MetadataPublisher::new(store);

        // Initialize registrar
        let registrar: Arc<dyn Registrar> = match &config.registration.registrar_url {
            Some(endpoint) => Arc::new(HttpRegistrar::new(HttpRegistrarConfig {
                endpoint: endpoint.clone(),
                token: config.registration.registrar_token.clone(),
                timeout,
            })?),
            None => {
                warn!("IPA_REGISTRAR_URL not set; registration will be a dry run");
                Arc::new(DryRunRegistrar::new())
            }
        };

        if registrar.submits_transactions() && matches!(config.storage.store, StoreConfig::Disk { .. }) {
            warn!("Registering with locally stored metadata; pin the stored files before the anchored URIs resolve");
        }

        let settings = RegistrationSettings {
            nft_contract: config.registration.nft_contract.clone(),
            license_terms: config.registration.license_terms,
            account: config.account.address.clone(),
            chain_id: config.network.chain_id.clone(),
            rpc_url: config.network.rpc_url.clone(),
            gateway: config.storage.gateway.clone(),
            wait_for_transaction: true,
        };

        info!(
            "✓ Context ready (store: {}, registrar: {}, chain: {})",
            publisher.store_name(),
            registrar.name(),
            settings.chain_id
        );

        Ok(Self {
            config: Arc::new(config),
            publisher,
            registrar,
            settings,
        })
    }
}

/// Construct a content store backend
pub fn build_store(store_type: ContentStoreType) -> PublishResult<Arc<dyn ContentStore>> {
    let store: Arc<dyn ContentStore> = match store_type {
        ContentStoreType::Pinata(config) => Arc::new(PinataStore::new(config)?),
        ContentStoreType::Disk { location } => Arc::new(DiskContentStore::new(location)),
        ContentStoreType::Memory => Arc::new(InMemoryContentStore::new()),
    };
    Ok(store)
}
