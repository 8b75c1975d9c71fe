use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventType;

/// Catalog entry describing a class of document and the properties parsing
/// is expected to yield.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentType {
    pub id: String,
    pub name: String,
    /// Declared property names, in display order.
    pub properties: Vec<String>,
    /// Event types for which a document of this type is required.
    #[serde(default)]
    pub required_for: Vec<EventType>,
}

impl DocumentType {
    #[must_use]
    pub fn declares(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    #[must_use]
    pub fn is_required_for(&self, event_type: EventType) -> bool {
        self.required_for.contains(&event_type)
    }
}
