//! Question update builder.
//!
//! The right operand is replaced as a unit: once any of `document_2_id`,
//! `property_2` or `comparison_value` is set, the stored operand is dropped
//! and rebuilt from the supplied fields alone.

use qaqc_core::entities::{NewQuestion, Question};
use qaqc_core::enums::Relation;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_1_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_2_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_value: Option<String>,
}

impl QuestionUpdate {
    #[must_use]
    pub const fn touches_right_operand(&self) -> bool {
        self.document_2_id.is_some() || self.property_2.is_some() || self.comparison_value.is_some()
    }

    /// Apply this update to `current`, producing the payload to validate.
    #[must_use]
    pub fn apply_to(&self, current: &Question) -> NewQuestion {
        let mut draft = current.to_draft();
        if let Some(document_1_id) = &self.document_1_id {
            draft.document_1_id.clone_from(document_1_id);
        }
        if let Some(property_1) = &self.property_1 {
            draft.property_1.clone_from(property_1);
        }
        if let Some(relation) = self.relation {
            draft.relation = relation;
        }
        if self.touches_right_operand() {
            draft.document_2_id.clone_from(&self.document_2_id);
            draft.property_2.clone_from(&self.property_2);
            draft.comparison_value.clone_from(&self.comparison_value);
        }
        if let Some(system_value) = &self.system_value {
            draft.system_value = Some(system_value.clone());
        }
        draft
    }
}

pub struct QuestionUpdateBuilder(QuestionUpdate);

impl QuestionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(QuestionUpdate::default())
    }

    #[must_use]
    pub fn document_1_id(mut self, id: impl Into<String>) -> Self {
        self.0.document_1_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn property_1(mut self, property: impl Into<String>) -> Self {
        self.0.property_1 = Some(property.into());
        self
    }

    #[must_use]
    pub const fn relation(mut self, relation: Relation) -> Self {
        self.0.relation = Some(relation);
        self
    }

    /// Compare against another document's property.
    #[must_use]
    pub fn document_operand(
        mut self,
        document_2_id: impl Into<String>,
        property_2: impl Into<String>,
    ) -> Self {
        self.0.document_2_id = Some(document_2_id.into());
        self.0.property_2 = Some(property_2.into());
        self
    }

    /// Compare against a literal.
    #[must_use]
    pub fn comparison_value(mut self, value: impl Into<String>) -> Self {
        self.0.comparison_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn system_value(mut self, value: impl Into<String>) -> Self {
        self.0.system_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> QuestionUpdate {
        self.0
    }
}

impl Default for QuestionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaqc_core::entities::RightOperand;

    fn fixed_question() -> Question {
        Question {
            id: "qst-1".into(),
            questionnaire_id: "qnr-1".into(),
            position: 0,
            document_1_id: "dty-1".into(),
            property_1: "Depth".into(),
            relation: Relation::GreaterThan,
            right: RightOperand::FixedValue {
                comparison_value: "10".into(),
            },
            system_value: String::new(),
        }
    }

    #[test]
    fn switching_to_document_operand_drops_literal() {
        let update = QuestionUpdateBuilder::new()
            .relation(Relation::Equals)
            .document_operand("dty-2", "Depth")
            .build();
        let draft = update.apply_to(&fixed_question());
        assert_eq!(draft.comparison_value, None);
        assert_eq!(
            draft.right_operand().unwrap(),
            RightOperand::DocumentProperty {
                document_2_id: "dty-2".into(),
                property_2: "Depth".into(),
            }
        );
    }

    #[test]
    fn untouched_operand_is_kept() {
        let update = QuestionUpdateBuilder::new().property_1("Elevation").build();
        let draft = update.apply_to(&fixed_question());
        assert_eq!(draft.property_1, "Elevation");
        assert_eq!(draft.comparison_value.as_deref(), Some("10"));
    }

    #[test]
    fn supplying_both_forms_is_caught_by_validation() {
        let update = QuestionUpdateBuilder::new()
            .document_operand("dty-2", "Depth")
            .comparison_value("12")
            .build();
        assert!(update.apply_to(&fixed_question()).right_operand().is_err());
    }
}
