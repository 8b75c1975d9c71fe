use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::DocumentType;
use crate::enums::Relation;
use crate::errors::CoreError;
use crate::evaluation::parse_number;

/// Right-hand side of a question: a second document property or a literal.
///
/// Flattened into [`Question`], so the wire shape keeps the console's
/// `document_2_id` / `property_2` / `comparison_value` fields while the
/// "both" and "neither" states cannot be constructed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RightOperand {
    DocumentProperty {
        document_2_id: String,
        property_2: String,
    },
    FixedValue {
        comparison_value: String,
    },
}

impl RightOperand {
    /// Document type referenced by the right operand, if any.
    #[must_use]
    pub fn document_type_id(&self) -> Option<&str> {
        match self {
            Self::DocumentProperty { document_2_id, .. } => Some(document_2_id),
            Self::FixedValue { .. } => None,
        }
    }
}

/// A single comparison rule belonging to a questionnaire.
///
/// Deserialized through [`RawQuestion`] so a record carrying both right
/// operand forms, or neither, is rejected instead of silently resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    pub id: String,
    pub questionnaire_id: String,
    /// Zero-based evaluation and display order within the questionnaire.
    pub position: u32,
    pub document_1_id: String,
    pub property_1: String,
    pub relation: Relation,
    #[serde(flatten)]
    pub right: RightOperand,
    /// Last observed value; owned by the server, opaque to evaluation.
    #[serde(default)]
    pub system_value: String,
}

/// Wire form of [`Question`] with the right operand as three nullable fields.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RawQuestion {
    pub id: String,
    pub questionnaire_id: String,
    pub position: u32,
    pub document_1_id: String,
    pub property_1: String,
    pub relation: Relation,
    #[serde(default)]
    pub document_2_id: Option<String>,
    #[serde(default)]
    pub property_2: Option<String>,
    #[serde(default)]
    pub comparison_value: Option<String>,
    #[serde(default)]
    pub system_value: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = CoreError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let draft = NewQuestion {
            document_1_id: raw.document_1_id,
            property_1: raw.property_1,
            relation: raw.relation,
            document_2_id: raw.document_2_id,
            property_2: raw.property_2,
            comparison_value: raw.comparison_value,
            system_value: None,
        };
        let right = draft.right_operand()?;
        Ok(Self {
            id: raw.id,
            questionnaire_id: raw.questionnaire_id,
            position: raw.position,
            document_1_id: draft.document_1_id,
            property_1: draft.property_1,
            relation: draft.relation,
            right,
            system_value: raw.system_value,
        })
    }
}

impl Question {
    /// Rebuild the creation payload, e.g. as the base for a partial update.
    #[must_use]
    pub fn to_draft(&self) -> NewQuestion {
        let (document_2_id, property_2, comparison_value) = match &self.right {
            RightOperand::DocumentProperty {
                document_2_id,
                property_2,
            } => (Some(document_2_id.clone()), Some(property_2.clone()), None),
            RightOperand::FixedValue { comparison_value } => {
                (None, None, Some(comparison_value.clone()))
            }
        };
        NewQuestion {
            document_1_id: self.document_1_id.clone(),
            property_1: self.property_1.clone(),
            relation: self.relation,
            document_2_id,
            property_2,
            comparison_value,
            system_value: Some(self.system_value.clone()),
        }
    }
}

/// Question creation payload as submitted by a client.
///
/// The right operand arrives as three nullable fields; [`NewQuestion::right_operand`]
/// turns them into a [`RightOperand`] or rejects the payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewQuestion {
    pub document_1_id: String,
    pub property_1: String,
    pub relation: Relation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_2_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_value: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl NewQuestion {
    /// Resolve the right operand. Exactly one of `document_2_id + property_2`
    /// or `comparison_value` must be populated.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for both, neither, or half of the
    /// document form, and for an ordering relation against a non-numeric
    /// literal.
    pub fn right_operand(&self) -> Result<RightOperand, CoreError> {
        let document = non_blank(self.document_2_id.as_ref());
        let property = non_blank(self.property_2.as_ref());
        let literal = non_blank(self.comparison_value.as_ref());

        let right = match (document, property, literal) {
            (Some(document_2_id), Some(property_2), None) => RightOperand::DocumentProperty {
                document_2_id: document_2_id.to_string(),
                property_2: property_2.to_string(),
            },
            (None, None, Some(comparison_value)) => RightOperand::FixedValue {
                comparison_value: comparison_value.to_string(),
            },
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err(CoreError::validation(
                    "document_2_id and property_2 must be given together",
                ));
            }
            (None, None, None) => {
                return Err(CoreError::validation(
                    "either document 2 + property 2 or a comparison value is required",
                ));
            }
            (_, _, Some(_)) => {
                return Err(CoreError::validation(
                    "a question compares against document 2 + property 2 \
                     or a comparison value, not both",
                ));
            }
        };

        if let RightOperand::FixedValue { comparison_value } = &right {
            if self.relation.is_ordering() && parse_number(comparison_value.trim()).is_none() {
                return Err(CoreError::Validation(format!(
                    "relation '{}' needs a numeric comparison value, got '{comparison_value}'",
                    self.relation
                )));
            }
        }

        if self.property_1.trim().is_empty() {
            return Err(CoreError::validation("property_1 is required"));
        }

        Ok(right)
    }
}

/// Check that every referenced property is declared by its document type.
///
/// `document_2` must be the type named by `right` when `right` is
/// document-based and is ignored otherwise.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the first undeclared property.
pub fn validate_operand_properties(
    document_1: &DocumentType,
    property_1: &str,
    right: &RightOperand,
    document_2: Option<&DocumentType>,
) -> Result<(), CoreError> {
    if !document_1.declares(property_1) {
        return Err(CoreError::Validation(format!(
            "document type '{}' does not declare property '{property_1}'",
            document_1.name
        )));
    }

    if let RightOperand::DocumentProperty {
        document_2_id,
        property_2,
    } = right
    {
        let document_2 = document_2.ok_or_else(|| {
            CoreError::Validation(format!("document type '{document_2_id}' is not loaded"))
        })?;
        if !document_2.declares(property_2) {
            return Err(CoreError::Validation(format!(
                "document type '{}' does not declare property '{property_2}'",
                document_2.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(relation: Relation) -> NewQuestion {
        NewQuestion {
            document_1_id: "dty-00000001".into(),
            property_1: "Depth".into(),
            relation,
            document_2_id: None,
            property_2: None,
            comparison_value: None,
            system_value: None,
        }
    }

    fn drilling_log() -> DocumentType {
        DocumentType {
            id: "dty-00000001".into(),
            name: "Drilling Log".into(),
            properties: vec!["Depth".into(), "Soil_Type".into()],
            required_for: Vec::new(),
        }
    }

    #[test]
    fn fixed_value_operand() {
        let mut q = draft(Relation::GreaterThan);
        q.comparison_value = Some("10".into());
        assert_eq!(
            q.right_operand().unwrap(),
            RightOperand::FixedValue {
                comparison_value: "10".into()
            }
        );
    }

    #[test]
    fn document_operand() {
        let mut q = draft(Relation::Equals);
        q.document_2_id = Some("dty-00000002".into());
        q.property_2 = Some("Temperature".into());
        assert_eq!(q.right_operand().unwrap().document_type_id(), Some("dty-00000002"));
    }

    #[test]
    fn both_forms_rejected() {
        let mut q = draft(Relation::Equals);
        q.document_2_id = Some("dty-00000002".into());
        q.property_2 = Some("Temperature".into());
        q.comparison_value = Some("6.8".into());
        let err = q.right_operand().unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn neither_form_rejected() {
        let err = draft(Relation::Equals).right_operand().unwrap_err();
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn blank_literal_counts_as_missing() {
        let mut q = draft(Relation::Equals);
        q.comparison_value = Some("   ".into());
        assert!(q.right_operand().is_err());
    }

    #[test]
    fn half_document_form_rejected() {
        let mut q = draft(Relation::Equals);
        q.document_2_id = Some("dty-00000002".into());
        let err = q.right_operand().unwrap_err();
        assert!(err.to_string().contains("together"));
    }

    #[test]
    fn ordering_relation_needs_numeric_literal() {
        let mut q = draft(Relation::LessThan);
        q.comparison_value = Some("deep".into());
        let err = q.right_operand().unwrap_err();
        assert!(err.to_string().contains("numeric comparison value"));
    }

    #[test]
    fn ordering_literal_may_be_padded() {
        let mut q = draft(Relation::GreaterThan);
        q.comparison_value = Some(" 10 ".into());
        assert!(q.right_operand().is_ok());
    }

    #[test]
    fn flattened_wire_shape() {
        let question = Question {
            id: "qst-00000001".into(),
            questionnaire_id: "qnr-00000001".into(),
            position: 0,
            document_1_id: "dty-00000001".into(),
            property_1: "Depth".into(),
            relation: Relation::GreaterThan,
            right: RightOperand::FixedValue {
                comparison_value: "10".into(),
            },
            system_value: "15".into(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["relation"], ">");
        assert_eq!(value["comparison_value"], "10");
        assert!(value.get("document_2_id").is_none());

        let recovered: Question = serde_json::from_value(value).unwrap();
        assert_eq!(recovered, question);
    }

    fn wire_question(right: serde_json::Value) -> serde_json::Value {
        let mut value = serde_json::json!({
            "id": "qst-00000003",
            "questionnaire_id": "qnr-00000001",
            "position": 2,
            "document_1_id": "dty-00000001",
            "property_1": "Depth",
            "relation": "Equals",
        });
        if let (Some(map), Some(extra)) = (value.as_object_mut(), right.as_object()) {
            map.extend(extra.clone());
        }
        value
    }

    #[test]
    fn deserializing_both_operand_forms_fails() {
        let value = wire_question(serde_json::json!({
            "document_2_id": "dty-00000002",
            "property_2": "Depth",
            "comparison_value": "10",
        }));
        let err = serde_json::from_value::<Question>(value).unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn deserializing_without_right_operand_fails() {
        let err = serde_json::from_value::<Question>(wire_question(serde_json::json!({})))
            .unwrap_err();
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn deserializing_half_document_operand_fails() {
        let value = wire_question(serde_json::json!({ "document_2_id": "dty-00000002" }));
        assert!(serde_json::from_value::<Question>(value).is_err());
    }

    #[test]
    fn deserializing_document_operand_succeeds() {
        let value = wire_question(serde_json::json!({
            "document_2_id": "dty-00000002",
            "property_2": "Depth",
            "comparison_value": null,
        }));
        let question: Question = serde_json::from_value(value).unwrap();
        assert_eq!(question.right.document_type_id(), Some("dty-00000002"));
        assert_eq!(question.system_value, "");
    }

    #[test]
    fn draft_roundtrip_preserves_operand() {
        let question = Question {
            id: "qst-00000002".into(),
            questionnaire_id: "qnr-00000001".into(),
            position: 1,
            document_1_id: "dty-00000002".into(),
            property_1: "pH".into(),
            relation: Relation::Equals,
            right: RightOperand::DocumentProperty {
                document_2_id: "dty-00000002".into(),
                property_2: "Temperature".into(),
            },
            system_value: String::new(),
        };
        assert_eq!(question.to_draft().right_operand().unwrap(), question.right);
    }

    #[test]
    fn undeclared_left_property_rejected() {
        let right = RightOperand::FixedValue {
            comparison_value: "10".into(),
        };
        let err =
            validate_operand_properties(&drilling_log(), "Moisture", &right, None).unwrap_err();
        assert!(err.to_string().contains("does not declare property 'Moisture'"));
    }

    #[test]
    fn undeclared_right_property_rejected() {
        let right = RightOperand::DocumentProperty {
            document_2_id: "dty-00000001".into(),
            property_2: "Elevation".into(),
        };
        let log = drilling_log();
        let err = validate_operand_properties(&log, "Depth", &right, Some(&log)).unwrap_err();
        assert!(err.to_string().contains("'Elevation'"));
    }
}
