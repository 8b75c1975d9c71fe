//! Document property values.
//!
//! A parsed document carries a closed mapping from the property names declared
//! by its document type to scalar values. Values keep the JSON type they were
//! reported with; the evaluator compares their text rendering.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A scalar extracted from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form used as an evaluation operand. `None` for null.
    #[must_use]
    pub fn as_operand(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_operand() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Property name → value, ordered by name for stable output.
pub type PropertyValues = BTreeMap<String, PropertyValue>;

/// Reject any property that the document type does not declare.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming every undeclared property.
pub fn validate_property_values(
    declared: &[String],
    values: &PropertyValues,
) -> Result<(), CoreError> {
    let unknown = values
        .keys()
        .filter(|name| !declared.iter().any(|d| d == *name))
        .map(String::as_str)
        .collect::<Vec<_>>();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "undeclared properties: {} (declared: {})",
            unknown.join(", "),
            declared.join(", ")
        )))
    }
}

/// Validate a document type's property list: non-empty names, no duplicates.
///
/// # Errors
///
/// Returns `CoreError::Validation` on the first offending name.
pub fn validate_property_names(properties: &[String]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for name in properties {
        if name.trim().is_empty() {
            return Err(CoreError::validation("property names must not be empty"));
        }
        if !seen.insert(name.as_str()) {
            return Err(CoreError::Validation(format!(
                "duplicate property name '{name}'"
            )));
        }
    }
    Ok(())
}
