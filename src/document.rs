/// Metadata documents
///
/// `MetadataDocument` is schema-less. `IpMetadata` and `NftMetadata` are
/// typed builders for the two documents an IP asset registration needs.
use crate::{
    canonical,
    error::{PublishError, PublishResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Arbitrary mapping of string keys to JSON values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataDocument(Map<String, Value>);

impl MetadataDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert any serializable value whose JSON form is an object
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> PublishResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| PublishError::Serialization(format!("Value is not JSON-serializable: {}", e)))?;
        Self::try_from(value)
    }

    /// Load a document from a JSON file
    pub fn from_json_file(path: &Path) -> PublishResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            PublishError::Serialization(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        Self::try_from(value)
    }

    /// Insert or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical bytes, the exact form that gets hashed and stored
    pub fn canonical_bytes(&self) -> PublishResult<Vec<u8>> {
        canonical::canonicalize(&self.0)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for MetadataDocument {
    type Error = PublishError;

    fn try_from(value: Value) -> PublishResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PublishError::Serialization(format!(
                "Metadata document must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for MetadataDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Key/value attribute on IP metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpAttribute {
    pub key: String,
    pub value: String,
}

/// Creator entry on IP metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpCreator {
    pub name: String,
    pub address: String,
    pub contribution_percent: u8,
}

/// Media entry on IP metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMedia {
    pub name: String,
    pub url: String,
    pub mime_type: String,
}

/// IP asset metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_img: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<IpCreator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<IpMedia>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<IpAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl IpMetadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn ip_type(mut self, ip_type: impl Into<String>) -> Self {
        self.ip_type = Some(ip_type.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn watermark_img(mut self, url: impl Into<String>) -> Self {
        self.watermark_img = Some(url.into());
        self
    }

    pub fn creator(mut self, name: impl Into<String>, address: impl Into<String>, contribution_percent: u8) -> Self {
        self.creators.push(IpCreator {
            name: name.into(),
            address: address.into(),
            contribution_percent,
        });
        self
    }

    pub fn media(mut self, name: impl Into<String>, url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        self.media.push(IpMedia {
            name: name.into(),
            url: url.into(),
            mime_type: mime_type.into(),
        });
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(IpAttribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Build the publishable document
    ///
    /// Creator contributions must add up to 100 when creators are present.
    pub fn into_document(self) -> PublishResult<MetadataDocument> {
        if !self.creators.is_empty() {
            let total: u32 = self.creators.iter().map(|c| c.contribution_percent as u32).sum();
            if total != 100 {
                return Err(PublishError::Validation(format!(
                    "Creator contributions must sum to 100, got {}",
                    total
                )));
            }
        }
        MetadataDocument::from_serializable(&self)
    }
}

/// ERC-721 attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: Value,
}

/// ERC-721 token metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<NftAttribute>,
}

impl NftMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: image.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(mut self, trait_type: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.push(NftAttribute {
            trait_type: trait_type.into(),
            value: value.into(),
        });
        self
    }

    pub fn into_document(self) -> PublishResult<MetadataDocument> {
        MetadataDocument::from_serializable(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_ip_metadata_field_names() {
        let doc = IpMetadata::new("My IP Asset", "Test")
            .watermark_img("https://example.com/w.png")
            .attribute("Rarity", "Legendary")
            .into_document()
            .unwrap();

        assert_eq!(doc.get("title"), Some(&json!("My IP Asset")));
        assert_eq!(doc.get("watermarkImg"), Some(&json!("https://example.com/w.png")));
        assert_eq!(
            doc.get("attributes"),
            Some(&json!([{"key": "Rarity", "value": "Legendary"}]))
        );
        // Unset optional fields are omitted entirely
        assert!(doc.get("ipType").is_none());
        assert!(doc.get("creators").is_none());
    }

    #[test]
    fn test_ip_metadata_created_at_is_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 10, 30, 17, 36, 5).unwrap();
        let doc = IpMetadata::new("t", "d").created_at(at).into_document().unwrap();
        assert_eq!(doc.get("createdAt"), Some(&json!("2024-10-30T17:36:05Z")));
    }

    #[test]
    fn test_creator_contributions_must_sum_to_100() {
        let err = IpMetadata::new("t", "d")
            .creator("Alice", "0x0000000000000000000000000000000000000001", 60)
            .creator("Bob", "0x0000000000000000000000000000000000000002", 30)
            .into_document()
            .unwrap_err();
        assert!(matches!(err, PublishError::Validation(_)));

        let doc = IpMetadata::new("t", "d")
            .creator("Alice", "0x0000000000000000000000000000000000000001", 100)
            .into_document()
            .unwrap();
        assert_eq!(doc.get("creators").unwrap()[0]["contributionPercent"], json!(100));
    }

    #[test]
    fn test_nft_metadata_document() {
        let doc = NftMetadata::new("Mahcubyan", "This is a test NFT", "https://example.com/i.png")
            .attribute("Level", 3)
            .into_document()
            .unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(
            doc.get("attributes"),
            Some(&json!([{"trait_type": "Level", "value": 3}]))
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = MetadataDocument::from_serializable(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, PublishError::Serialization(_)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip.json");
        std::fs::write(&path, r#"{"title": "From file", "description": "x"}"#).unwrap();

        let doc = MetadataDocument::from_json_file(&path).unwrap();
        assert_eq!(doc.get("title"), Some(&json!("From file")));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MetadataDocument::from_json_file(&path),
            Err(PublishError::Serialization(_))
        ));

        assert!(matches!(
            MetadataDocument::from_json_file(&dir.path().join("missing.json")),
            Err(PublishError::Io(_))
        ));
    }

    #[test]
    fn test_canonical_bytes_sorted() {
        let mut doc = MetadataDocument::new();
        doc.insert("title", "My IP Asset");
        doc.insert("description", "Test");
        assert_eq!(
            doc.canonical_bytes().unwrap(),
            br#"{"description":"Test","title":"My IP Asset"}"#.to_vec()
        );
    }
}
