//! Record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field map of one document. No fixed schema; fields are caller-defined.
pub type Fields = serde_json::Map<String, Value>;

/// One document's field map plus its store-assigned identifier.
///
/// The `id` is always populated from the store, never generated on the
/// client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned document id
    pub id: String,

    /// Document fields (JSON)
    pub fields: Fields,

    /// Store-reported creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,

    /// Store-reported last write timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Record {
    /// Create a record from a store id and field map.
    pub fn new(id: String, fields: Fields) -> Self {
        Self {
            id,
            fields,
            create_time: None,
            update_time: None,
        }
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
