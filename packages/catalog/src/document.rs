//! Raw records as the document database returns them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

/// A single stored record. System attributes carry a `$` prefix on the wire;
/// every other attribute lands in `fields`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One page of a collection listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    /// Number of documents in the whole collection, not just this page.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Document {
    /// Build a document from an id and a JSON object of attributes.
    /// Non-object values produce a document without attributes.
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: id.into(),
            collection_id: String::new(),
            created_at: None,
            fields,
        }
    }

    pub fn in_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = collection_id.into();
        self
    }

    /// String attribute, if present and a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Decode into a typed entity. The `$id` attribute is made available to the
    /// target type under its wire name.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let mut object = self.fields.clone();
        object.insert("$id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(object))
            .map_err(|e| FetchError::Malformed(format!("document {}: {}", self.id, e)))
    }
}

impl DocumentList {
    /// Whether the backend holds more documents than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.total > self.documents.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_splits_system_attributes() {
        let raw = json!({
            "$id": "c1",
            "$collectionId": "courses",
            "$createdAt": "2024-05-01T10:00:00.000+00:00",
            "$permissions": [],
            "title": "Rust in Action",
            "duration": 3600
        });
        let doc: Document = serde_json::from_value(raw).unwrap();
        assert_eq!(doc.id, "c1");
        assert_eq!(doc.collection_id, "courses");
        assert_eq!(doc.str_field("title"), Some("Rust in Action"));
        assert!(doc.fields.contains_key("$permissions"));
        assert!(!doc.fields.contains_key("$id"));
    }

    #[test]
    fn test_decode_reports_malformed() {
        #[derive(Debug, Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            count: u32,
        }
        let doc = Document::new("d1", json!({ "count": "many" }));
        let err = doc.decode::<Needs>().unwrap_err();
        assert!(matches!(err, FetchError::Malformed(ref m) if m.starts_with("document d1")));
    }

    #[test]
    fn test_truncated_page() {
        let list = DocumentList {
            total: 30,
            documents: vec![Document::new("a", json!({}))],
        };
        assert!(list.is_truncated());
        assert!(!DocumentList::default().is_truncated());
    }
}
