/// End-to-end registration flow with in-memory collaborators
use async_trait::async_trait;
use ipa_publisher::{
    registration::DryRunRegistrar,
    report::Report,
    store::InMemoryContentStore,
    workflow::{register_ip_asset, RegistrationSettings},
    GatewayTemplate, IpMetadata, LicenseTerms, MetadataPublisher, NftMetadata, PublishError,
    PublishResult, Registrar, RegistrationReceipt, RegistrationRequest,
};
use std::sync::{Arc, Mutex};

fn settings() -> RegistrationSettings {
    RegistrationSettings {
        nft_contract: "0x00000000000000000000000000000000000000c0".to_string(),
        license_terms: LicenseTerms::NonCommercialSocialRemixing,
        account: "0x00000000000000000000000000000000000000a1".to_string(),
        chain_id: "iliad".to_string(),
        rpc_url: "https://testnet.storyrpc.io".to_string(),
        gateway: GatewayTemplate::default(),
        wait_for_transaction: true,
    }
}

/// Captures the request it receives
#[derive(Default)]
struct RecordingRegistrar {
    seen: Mutex<Option<RegistrationRequest>>,
}

#[async_trait]
impl Registrar for RecordingRegistrar {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn register(&self, request: &RegistrationRequest) -> PublishResult<RegistrationReceipt> {
        *self.seen.lock().unwrap() = Some(request.clone());
        Ok(RegistrationReceipt {
            tx_hash: "0xfeed".to_string(),
            ip_id: "0x00000000000000000000000000000000000000ee".to_string(),
        })
    }
}

struct FailingRegistrar;

#[async_trait]
impl Registrar for FailingRegistrar {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn register(&self, _request: &RegistrationRequest) -> PublishResult<RegistrationReceipt> {
        Err(PublishError::RegistrationFailed("transaction reverted".to_string()))
    }
}

#[tokio::test]
async fn test_full_flow_forwards_pairs_unmodified() {
    let store = Arc::new(InMemoryContentStore::new());
    let publisher = MetadataPublisher::new(store.clone());
    let registrar = RecordingRegistrar::default();

    let ip = IpMetadata::new("My IP Asset", "Test")
        .attribute("Rarity", "Legendary")
        .into_document()
        .unwrap();
    let nft = NftMetadata::new("Sample NFT", "This is a test NFT", "https://example.com/i.png")
        .into_document()
        .unwrap();

    let registration = register_ip_asset(&publisher, &registrar, &settings(), &ip, &nft)
        .await
        .unwrap();

    let request = registrar.seen.lock().unwrap().clone().unwrap();
    assert_eq!(request, registration.request);
    assert_eq!(
        request.ip_metadata.ip_metadata_uri,
        format!("https://ipfs.io/ipfs/{}", registration.ip_metadata.locator())
    );
    assert_eq!(
        request.ip_metadata.ip_metadata_hash,
        registration.ip_metadata.fingerprint().to_prefixed_hex()
    );
    assert_eq!(
        request.ip_metadata.nft_metadata_hash,
        registration.nft_metadata.fingerprint().to_prefixed_hex()
    );

    // Stored bytes hash to the anchored fingerprints
    let stored_ip = store.get(registration.ip_metadata.locator()).await.unwrap();
    assert!(MetadataPublisher::verify(&registration.ip_metadata, &stored_ip));
    assert_eq!(store.put_count(), 2);

    // Locally derived locators are CIDv1 strings a gateway can resolve
    let locator = registration.ip_metadata.locator();
    assert!(locator.starts_with("bafkrei"));
    assert_eq!(locator.len(), 59);
    assert!(locator.chars().all(|c| matches!(c, 'a'..='z' | '2'..='7')));

    assert_eq!(registration.receipt.tx_hash, "0xfeed");
}

#[tokio::test]
async fn test_registration_failure_keeps_published_content() {
    let store = Arc::new(InMemoryContentStore::new());
    let publisher = MetadataPublisher::new(store.clone());

    let ip = IpMetadata::new("My IP Asset", "Test").into_document().unwrap();
    let nft = NftMetadata::new("Sample NFT", "d", "https://example.com/i.png")
        .into_document()
        .unwrap();

    let err = register_ip_asset(&publisher, &FailingRegistrar, &settings(), &ip, &nft)
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::RegistrationFailed(_)));
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_dry_run_report() {
    let publisher = MetadataPublisher::new(Arc::new(InMemoryContentStore::new()));
    let ip = IpMetadata::new("My IP Asset", "Test").into_document().unwrap();
    let nft = NftMetadata::new("Sample NFT", "d", "https://example.com/i.png")
        .into_document()
        .unwrap();

    let registration = register_ip_asset(&publisher, &DryRunRegistrar::new(), &settings(), &ip, &nft)
        .await
        .unwrap();

    assert!(registration.dry_run);

    let report = Report::for_registration(&registration, "https://explorer.story.foundation").to_string();
    assert_eq!(report.lines().count(), 1);
    assert!(report.starts_with("Dry run: no transaction submitted (simulated hash 0x"));
    assert!(report.contains(&registration.receipt.ip_id));
    assert!(!report.contains("Root IPA created"));
    assert!(!report.contains("/ipa/"));
}

#[tokio::test]
async fn test_submitted_registration_report() {
    let publisher = MetadataPublisher::new(Arc::new(InMemoryContentStore::new()));
    let ip = IpMetadata::new("My IP Asset", "Test").into_document().unwrap();
    let nft = NftMetadata::new("Sample NFT", "d", "https://example.com/i.png")
        .into_document()
        .unwrap();

    let registration = register_ip_asset(&publisher, &RecordingRegistrar::default(), &settings(), &ip, &nft)
        .await
        .unwrap();
    assert!(!registration.dry_run);

    let report = Report::for_registration(&registration, "https://explorer.story.foundation").to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "Root IPA created at transaction hash 0xfeed, IPA ID: 0x00000000000000000000000000000000000000ee"
    );
    assert_eq!(
        lines[1],
        "View on the explorer: https://explorer.story.foundation/ipa/0x00000000000000000000000000000000000000ee"
    );
}
