use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DocumentStatus, FileFormat};
use crate::values::{PropertyValue, PropertyValues};

/// A document attached to an event. `properties_values` is populated by the
/// external parser once the document reaches `Parsed`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Document {
    pub id: String,
    pub event_id: String,
    pub document_type_id: String,
    pub file_name: String,
    pub file_format: FileFormat,
    #[serde(default)]
    pub properties_values: PropertyValues,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.status == DocumentStatus::Parsed
    }

    /// Non-null value of `property`, if any.
    #[must_use]
    pub fn value_of(&self, property: &str) -> Option<&PropertyValue> {
        self.properties_values
            .get(property)
            .filter(|value| !value.is_null())
    }
}
