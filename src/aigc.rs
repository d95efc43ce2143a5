//! AIGC provenance metadata carried in the `AIGC` chunk.
//!
//! The codec treats the chunk payload as opaque bytes. This module is the
//! convenience layer for the common case where the payload is a JSON object
//! with the standard provenance fields.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AigcMetadata {
    #[serde(rename = "Label", default)]
    pub label: String,
    #[serde(rename = "ContentProducer", default)]
    pub content_producer: String,
    #[serde(rename = "ProduceID", default)]
    pub produce_id: String,
    #[serde(rename = "ReservedCode1", default)]
    pub reserved_code1: String,
    #[serde(rename = "ContentPropagator", default)]
    pub content_propagator: String,
    #[serde(rename = "PropagateID", default)]
    pub propagate_id: String,
    #[serde(rename = "ReservedCode2", default)]
    pub reserved_code2: String,
}

impl AigcMetadata {
    /// Metadata for freshly produced content, with a new random `ProduceID`
    pub fn produced_by(label: &str, producer: &str) -> Self {
        Self {
            label: label.to_string(),
            content_producer: producer.to_string(),
            produce_id: Uuid::new_v4().simple().to_string(),
            ..Default::default()
        }
    }

    /// Compact UTF-8 JSON, the form written into the chunk
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AigcError;

    #[test]
    fn test_field_names_and_order() {
        let meta = AigcMetadata {
            label: "value1".to_string(),
            content_producer: "value2".to_string(),
            produce_id: "value3".to_string(),
            reserved_code1: "value4".to_string(),
            content_propagator: "value5".to_string(),
            propagate_id: "value6".to_string(),
            reserved_code2: "value7".to_string(),
        };

        let json = String::from_utf8(meta.to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"Label":"value1","ContentProducer":"value2","ProduceID":"value3","ReservedCode1":"value4","ContentPropagator":"value5","PropagateID":"value6","ReservedCode2":"value7"}"#
        );
    }

    #[test]
    fn test_parse_partial_document() {
        let meta = AigcMetadata::from_json_bytes(br#"{"Label":"1","ProduceID":"abc"}"#).unwrap();
        assert_eq!(meta.label, "1");
        assert_eq!(meta.produce_id, "abc");
        assert!(meta.content_producer.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let result = AigcMetadata::from_json_bytes(b"not json");
        assert!(matches!(result, Err(AigcError::InvalidPayload(_))));
    }

    #[test]
    fn test_produced_by_assigns_unique_ids() {
        let a = AigcMetadata::produced_by("1", "studio");
        let b = AigcMetadata::produced_by("1", "studio");
        assert_eq!(a.content_producer, "studio");
        assert_eq!(a.produce_id.len(), 32);
        assert_ne!(a.produce_id, b.produce_id);
    }
}
