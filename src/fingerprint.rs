/// SHA-256 fingerprints over canonical document bytes
use crate::error::{PublishError, PublishResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Fixed-length digest proving a document matches an anchored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of a byte sequence
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// 64 lowercase hex characters
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// On-chain form: `0x` followed by the hex digest
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.as_hex())
    }

    /// Check that `data` hashes to this fingerprint
    pub fn matches(&self, data: &[u8]) -> bool {
        Self::of_bytes(data) == *self
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = PublishError;

    /// Accepts both the bare and the `0x`-prefixed form
    fn from_str(s: &str) -> PublishResult<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != FINGERPRINT_HEX_LEN {
            return Err(PublishError::Validation(format!(
                "Fingerprint must be {} hex characters, got {}",
                FINGERPRINT_HEX_LEN,
                digits.len()
            )));
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| PublishError::Validation(format!("Invalid fingerprint hex: {}", e)))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
