/// Content Storage System
///
/// Holds canonical metadata bytes and hands back a locator for them.
/// Supports multiple backend implementations (Pinata, disk, in-memory).

pub mod disk;
pub mod memory;
pub mod pinata;

pub use disk::DiskContentStore;
pub use memory::InMemoryContentStore;
pub use pinata::{PinataConfig, PinataStore};

use crate::error::PublishResult;
use crate::fingerprint::Fingerprint;
use async_trait::async_trait;
use std::path::PathBuf;

/// Prefix shared by every local locator (CIDv1, raw codec, sha2-256)
pub const LOCAL_LOCATOR_PREFIX: &str = "bafkrei";

/// CIDv1 header: version 1, raw codec, sha2-256 multihash of 32 bytes
const CID_V1_RAW_SHA256_HEADER: [u8; 4] = [0x01, 0x55, 0x12, 0x20];

/// Length of a local locator: multibase `b` plus 36 bytes in unpadded base32
pub const LOCAL_LOCATOR_LEN: usize = 59;

/// Content store backend trait
///
/// Implementations upload bytes exactly as given and never re-encode them.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Backend name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Store content and return its locator
    async fn put(&self, name: &str, content: Vec<u8>) -> PublishResult<String>;
}

/// Backend selection for content storage
#[derive(Debug, Clone)]
pub enum ContentStoreType {
    /// Pin content through the Pinata API
    Pinata(PinataConfig),

    /// Store content on local disk
    Disk { location: PathBuf },

    /// Keep content in process memory
    Memory,
}

/// Derive a locator for stores that address content locally
///
/// The locator is the CIDv1 an IPFS node computes for the same raw bytes,
/// so it resolves through any gateway once the content is pinned.
pub fn local_locator(content: &[u8]) -> String {
    let mut cid = CID_V1_RAW_SHA256_HEADER.to_vec();
    cid.extend_from_slice(Fingerprint::of_bytes(content).as_bytes());

    // Multibase "b": RFC4648 lowercase base32 without padding
    let encoded = base32::encode(base32::Alphabet::Rfc4648Lower { padding: false }, &cid);
    format!("b{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_locator_is_content_derived() {
        let a = local_locator(b"{}");
        assert_eq!(
            a,
            "bafkreicecnx2gvntm6fbcrvnc336qze6st5u7qq7457igegamd3bzkx7ri"
        );
        assert_eq!(a, local_locator(b"{}"));
        assert_ne!(a, local_locator(b"[]"));
    }

    #[test]
    fn test_local_locator_is_base32_cid() {
        for content in [&b"{}"[..], &b""[..], &br#"{"title":"My IP Asset"}"#[..]] {
            let locator = local_locator(content);
            assert_eq!(locator.len(), LOCAL_LOCATOR_LEN);
            assert!(locator.starts_with(LOCAL_LOCATOR_PREFIX));
            assert!(locator
                .chars()
                .all(|c| matches!(c, 'a'..='z' | '2'..='7')));
        }
    }
}
