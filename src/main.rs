/// IPA Publisher - mint, register and license an IP asset
///
/// Publishes the IP and NFT metadata documents, registers the asset and
/// prints the transaction hash plus an explorer link.
use ipa_publisher::{
    config::{AppConfig, LogFormat, LoggingConfig},
    context::AppContext,
    error::PublishResult,
    metrics,
    report::Report,
    workflow, IpMetadata, MetadataDocument, NftMetadata,
};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_IMAGE: &str =
    "https://ipfs.io/ipfs/bafkreiabtiwkvubhnbu6xscwzkyxepll6kb5de5wy7xpk22fictcux53xi";

#[tokio::main]
async fn main() -> PublishResult<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize logging
    init_logging(&config.logging);

    // Create application context
    let ctx = AppContext::new(config)?;

    let ip_document = load_document(
        ctx.config.metadata.ip_metadata_file.as_deref(),
        sample_ip_metadata,
    )?;
    let nft_document = load_document(
        ctx.config.metadata.nft_metadata_file.as_deref(),
        sample_nft_metadata,
    )?;

    let registration = workflow::register_ip_asset(
        &ctx.publisher,
        ctx.registrar.as_ref(),
        &ctx.settings,
        &ip_document,
        &nft_document,
    )
    .await?;

    info!(
        "IP metadata {} / NFT metadata {}",
        registration.ip_metadata.locator(),
        registration.nft_metadata.locator()
    );

    println!(
        "{}",
        Report::for_registration(&registration, &ctx.config.network.explorer_url)
    );

    debug!("Metrics:\n{}", metrics::export_metrics());

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&logging.level)
        .unwrap_or_else(|_| "ipa_publisher=info".into());
    let json = logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

/// Read a document from file, or fall back to the built-in sample
fn load_document(
    path: Option<&Path>,
    sample: fn() -> PublishResult<MetadataDocument>,
) -> PublishResult<MetadataDocument> {
    match path {
        Some(path) => {
            info!("Loading metadata from {}", path.display());
            MetadataDocument::from_json_file(path)
        }
        None => sample(),
    }
}

fn sample_ip_metadata() -> PublishResult<MetadataDocument> {
    IpMetadata::new("My IP Asset", "Test IP asset")
        .watermark_img(SAMPLE_IMAGE)
        .attribute("Rarity", "Legendary")
        .into_document()
}

fn sample_nft_metadata() -> PublishResult<MetadataDocument> {
    NftMetadata::new("Sample NFT", "This is a test NFT", SAMPLE_IMAGE).into_document()
}
