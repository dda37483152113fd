/// Mint, register and attach terms in one linear flow
///
/// publish IP metadata -> publish NFT metadata -> register.
/// Any failure aborts the flow. Content already published stays in the
/// store; that is fine for a content-addressed store.
use crate::{
    anchor::{AnchoredMetadata, GatewayTemplate},
    document::MetadataDocument,
    error::PublishResult,
    metrics,
    publisher::{MetadataPublisher, PublicationResult},
    registration::{LicenseTerms, MetadataAnchors, Registrar, RegistrationReceipt, RegistrationRequest},
};
use tracing::{error, info};

/// Caller-supplied values forwarded to the registrar
#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub nft_contract: String,
    pub license_terms: LicenseTerms,
    pub account: String,
    pub chain_id: String,
    pub rpc_url: String,
    pub gateway: GatewayTemplate,
    pub wait_for_transaction: bool,
}

/// Everything produced by a successful run
#[derive(Debug, Clone)]
pub struct IpAssetRegistration {
    pub ip_metadata: PublicationResult,
    pub nft_metadata: PublicationResult,
    pub request: RegistrationRequest,
    pub receipt: RegistrationReceipt,
    /// Receipt was simulated; nothing reached the chain
    pub dry_run: bool,
}

/// Build the registration request from two publications
pub fn build_request(
    settings: &RegistrationSettings,
    ip_metadata: &PublicationResult,
    nft_metadata: &PublicationResult,
) -> RegistrationRequest {
    let ip_anchor = AnchoredMetadata::from_publication(ip_metadata, &settings.gateway);
    let nft_anchor = AnchoredMetadata::from_publication(nft_metadata, &settings.gateway);

    RegistrationRequest {
        nft_contract: settings.nft_contract.clone(),
        license_terms: settings.license_terms,
        ip_metadata: MetadataAnchors::new(&ip_anchor, &nft_anchor),
        account: settings.account.clone(),
        chain_id: settings.chain_id.clone(),
        rpc_url: settings.rpc_url.clone(),
        wait_for_transaction: settings.wait_for_transaction,
    }
}

/// Publish both documents and register the IP asset
pub async fn register_ip_asset(
    publisher: &MetadataPublisher,
    registrar: &dyn Registrar,
    settings: &RegistrationSettings,
    ip_document: &MetadataDocument,
    nft_document: &MetadataDocument,
) -> PublishResult<IpAssetRegistration> {
    let ip_metadata = publisher.publish(ip_document).await?;
    let nft_metadata = publisher.publish(nft_document).await?;

    let request = build_request(settings, &ip_metadata, &nft_metadata);

    info!(
        "Registering IP asset on {} with {} terms via {} registrar",
        settings.chain_id,
        settings.license_terms,
        registrar.name()
    );

    let receipt = match registrar.register(&request).await {
        Ok(receipt) => {
            metrics::record_registration(registrar.name(), "success");
            receipt
        }
        Err(e) => {
            metrics::record_registration(registrar.name(), e.kind());
            error!("Registration failed after publishing metadata: {}", e);
            return Err(e);
        }
    };

    Ok(IpAssetRegistration {
        ip_metadata,
        nft_metadata,
        request,
        receipt,
        dry_run: !registrar.submits_transactions(),
    })
}
