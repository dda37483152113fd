//! IPA Publisher - content-addressed metadata publication
//!
//! Publishes IP and NFT metadata documents to a content store with a
//! SHA-256 fingerprint over one canonical JSON encoding, then hands the
//! resulting (locator, fingerprint) pairs to an IP asset registrar.

pub mod anchor;
pub mod canonical;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod metrics;
pub mod publisher;
pub mod registration;
pub mod report;
pub mod store;
pub mod workflow;

pub use anchor::{AnchoredMetadata, GatewayTemplate};
pub use document::{IpMetadata, MetadataDocument, NftMetadata};
pub use error::{PublishError, PublishResult};
pub use fingerprint::Fingerprint;
pub use publisher::{MetadataPublisher, PublicationResult};
pub use registration::{LicenseTerms, Registrar, RegistrationReceipt, RegistrationRequest};
pub use store::ContentStore;
