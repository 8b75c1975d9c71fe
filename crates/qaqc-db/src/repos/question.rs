//! Question repository: ordered comparison rules of a questionnaire.
//!
//! Every write goes through the same validation: exactly one right operand,
//! referenced document types exist and declare the referenced properties,
//! ordering relations against a literal need a number.

use qaqc_core::entities::{
    DocumentType, NewQuestion, Question, Questionnaire, RightOperand, validate_operand_properties,
};
use qaqc_core::enums::EntityType;
use qaqc_core::ids::PREFIX_QUESTION;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_enum};
use crate::service::QaqcService;
use crate::updates::question::QuestionUpdate;

const SELECT_COLS: &str = "id, questionnaire_id, position, document_1_id, property_1, relation, \
     document_2_id, property_2, comparison_value, system_value";

fn row_to_question(row: &libsql::Row) -> Result<Question, DatabaseError> {
    let id: String = row.get(0)?;
    let right = match (
        get_opt_string(row, 6)?,
        get_opt_string(row, 7)?,
        row.get::<Option<String>>(8)?,
    ) {
        (Some(document_2_id), Some(property_2), None) => RightOperand::DocumentProperty {
            document_2_id,
            property_2,
        },
        (None, None, Some(comparison_value)) => RightOperand::FixedValue { comparison_value },
        _ => {
            return Err(DatabaseError::InvalidState(format!(
                "question {id} has an ambiguous right operand"
            )));
        }
    };

    Ok(Question {
        id,
        questionnaire_id: row.get(1)?,
        position: get_u32(row, 2)?,
        document_1_id: row.get(3)?,
        property_1: row.get(4)?,
        relation: parse_enum(&row.get::<String>(5)?)?,
        right,
        system_value: row.get(9)?,
    })
}

/// Column values for a right operand: `(document_2_id, property_2, comparison_value)`.
fn right_columns(right: &RightOperand) -> (Option<&str>, Option<&str>, Option<&str>) {
    match right {
        RightOperand::DocumentProperty {
            document_2_id,
            property_2,
        } => (Some(document_2_id.as_str()), Some(property_2.as_str()), None),
        RightOperand::FixedValue { comparison_value } => {
            (None, None, Some(comparison_value.as_str()))
        }
    }
}

impl QaqcService {
    /// Validate a draft against the catalog and return its right operand.
    async fn validate_question(
        &self,
        questionnaire: &Questionnaire,
        draft: &NewQuestion,
    ) -> Result<RightOperand, DatabaseError> {
        let right = draft.right_operand()?;

        let document_1 = self.get_document_type(&draft.document_1_id).await?;
        let document_2 = match right.document_type_id() {
            Some(id) => Some(self.get_document_type(id).await?),
            None => None,
        };
        validate_operand_properties(&document_1, &draft.property_1, &right, document_2.as_ref())?;

        if let Some(scope) = questionnaire.event_type {
            let referenced: [Option<&DocumentType>; 2] = [Some(&document_1), document_2.as_ref()];
            for doc_type in referenced.into_iter().flatten() {
                if !doc_type.is_required_for(scope) {
                    tracing::warn!(
                        questionnaire = %questionnaire.id,
                        document_type = %doc_type.name,
                        event_type = %scope,
                        "question references a document type not required for the \
                         questionnaire's event type"
                    );
                }
            }
        }

        Ok(right)
    }

    /// Append a question at the end of the questionnaire.
    pub async fn add_question(
        &self,
        questionnaire_id: &str,
        draft: NewQuestion,
    ) -> Result<Question, DatabaseError> {
        let questionnaire = self.get_questionnaire(questionnaire_id).await?;
        let right = self.validate_question(&questionnaire, &draft).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COALESCE(MAX(position) + 1, 0) FROM questions WHERE questionnaire_id = ?1",
                [questionnaire_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let position = get_u32(&row, 0)?;

        let id = self.db().generate_id(PREFIX_QUESTION).await?;
        let system_value = draft.system_value.clone().unwrap_or_default();
        let (document_2_id, property_2, comparison_value) = right_columns(&right);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO questions ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                libsql::params![
                    id.as_str(),
                    questionnaire_id,
                    i64::from(position),
                    draft.document_1_id.as_str(),
                    draft.property_1.as_str(),
                    draft.relation.as_str(),
                    document_2_id,
                    property_2,
                    comparison_value,
                    system_value.as_str()
                ],
            )
            .await?;

        Ok(Question {
            id,
            questionnaire_id: questionnaire_id.to_string(),
            position,
            document_1_id: draft.document_1_id,
            property_1: draft.property_1,
            relation: draft.relation,
            right,
            system_value,
        })
    }

    pub async fn get_question(&self, id: &str) -> Result<Question, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM questions WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Question, id))?;
        row_to_question(&row)
    }

    /// Apply a partial update and re-validate the whole question.
    pub async fn update_question(
        &self,
        question_id: &str,
        update: QuestionUpdate,
    ) -> Result<Question, DatabaseError> {
        let current = self.get_question(question_id).await?;
        let questionnaire = self.get_questionnaire(&current.questionnaire_id).await?;
        let draft = update.apply_to(&current);
        let right = self.validate_question(&questionnaire, &draft).await?;
        let (document_2_id, property_2, comparison_value) = right_columns(&right);

        self.db()
            .conn()
            .execute(
                "UPDATE questions SET document_1_id = ?1, property_1 = ?2, relation = ?3,
                 document_2_id = ?4, property_2 = ?5, comparison_value = ?6, system_value = ?7
                 WHERE id = ?8",
                libsql::params![
                    draft.document_1_id.as_str(),
                    draft.property_1.as_str(),
                    draft.relation.as_str(),
                    document_2_id,
                    property_2,
                    comparison_value,
                    draft.system_value.unwrap_or_default(),
                    question_id
                ],
            )
            .await?;

        self.get_question(question_id).await
    }

    /// Delete a question and close the gap in positions.
    pub async fn remove_question(&self, question_id: &str) -> Result<(), DatabaseError> {
        let question = self.get_question(question_id).await?;

        let tx = self.db().conn().transaction().await?;
        tx.execute("DELETE FROM questions WHERE id = ?1", [question_id])
            .await?;
        tx.execute(
            "UPDATE questions SET position = position - 1
             WHERE questionnaire_id = ?1 AND position > ?2",
            libsql::params![
                question.questionnaire_id.as_str(),
                i64::from(question.position)
            ],
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Questions of a questionnaire in position order.
    pub async fn list_questions(
        &self,
        questionnaire_id: &str,
    ) -> Result<Vec<Question>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM questions WHERE questionnaire_id = ?1
                     ORDER BY position"
                ),
                [questionnaire_id],
            )
            .await?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await? {
            questions.push(row_to_question(&row)?);
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_test_document_type, create_test_questionnaire, test_service,
    };
    use crate::updates::question::QuestionUpdateBuilder;
    use pretty_assertions::assert_eq;
    use qaqc_core::enums::{EventType, Relation};

    struct Fixture {
        questionnaire_id: String,
        log_id: String,
        gw_id: String,
    }

    async fn fixture(svc: &QaqcService) -> Fixture {
        let questionnaire = create_test_questionnaire(svc, Some(EventType::Drilling)).await;
        let log = create_test_document_type(
            svc,
            "Drilling Log",
            &["Depth", "Soil_Type"],
            vec![EventType::Drilling],
        )
        .await;
        let gw = create_test_document_type(
            svc,
            "Groundwater Monitoring",
            &["pH", "Temperature"],
            vec![EventType::Gwms],
        )
        .await;
        Fixture {
            questionnaire_id: questionnaire.id,
            log_id: log.id,
            gw_id: gw.id,
        }
    }

    fn depth_over(type_id: &str, value: &str) -> NewQuestion {
        NewQuestion {
            document_1_id: type_id.into(),
            property_1: "Depth".into(),
            relation: Relation::GreaterThan,
            document_2_id: None,
            property_2: None,
            comparison_value: Some(value.into()),
            system_value: None,
        }
    }

    #[tokio::test]
    async fn questions_get_sequential_positions() {
        let svc = test_service().await;
        let f = fixture(&svc).await;

        let first = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "10"))
            .await
            .unwrap();
        let second = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "20"))
            .await
            .unwrap();
        assert!(first.id.starts_with("qst-"));
        assert_eq!((first.position, second.position), (0, 1));

        let listed = svc.list_questions(&f.questionnaire_id).await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn both_operands_rejected() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let mut draft = depth_over(&f.log_id, "10");
        draft.document_2_id = Some(f.log_id.clone());
        draft.property_2 = Some("Depth".into());

        let result = svc.add_question(&f.questionnaire_id, draft).await;
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn undeclared_property_rejected() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let mut draft = depth_over(&f.log_id, "10");
        draft.property_1 = "Moisture".into();

        let result = svc.add_question(&f.questionnaire_id, draft).await;
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn unknown_document_type_rejected() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let result = svc
            .add_question(&f.questionnaire_id, depth_over("dty-00000000", "10"))
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn out_of_scope_document_type_is_allowed() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let draft = NewQuestion {
            document_1_id: f.gw_id.clone(),
            property_1: "pH".into(),
            relation: Relation::Equals,
            document_2_id: Some(f.gw_id.clone()),
            property_2: Some("Temperature".into()),
            comparison_value: None,
            system_value: None,
        };
        assert!(svc.add_question(&f.questionnaire_id, draft).await.is_ok());
    }

    #[tokio::test]
    async fn update_switches_operand_form() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let question = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "10"))
            .await
            .unwrap();

        let update = QuestionUpdateBuilder::new()
            .relation(Relation::Equals)
            .document_operand(f.log_id.clone(), "Soil_Type")
            .build();
        let updated = svc.update_question(&question.id, update).await.unwrap();
        assert_eq!(updated.relation, Relation::Equals);
        assert_eq!(updated.right.document_type_id(), Some(f.log_id.as_str()));
        assert_eq!(updated.position, 0);
    }

    #[tokio::test]
    async fn update_rejects_non_numeric_ordering_literal() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let question = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "10"))
            .await
            .unwrap();

        let update = QuestionUpdateBuilder::new().comparison_value("deep").build();
        let result = svc.update_question(&question.id, update).await;
        assert!(result.unwrap_err().is_validation());
        assert_eq!(svc.get_question(&question.id).await.unwrap(), question);
    }

    #[tokio::test]
    async fn remove_question_closes_gap() {
        let svc = test_service().await;
        let f = fixture(&svc).await;
        let a = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "1"))
            .await
            .unwrap();
        let b = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "2"))
            .await
            .unwrap();
        let c = svc
            .add_question(&f.questionnaire_id, depth_over(&f.log_id, "3"))
            .await
            .unwrap();

        svc.remove_question(&b.id).await.unwrap();
        let remaining = svc
            .list_questions(&f.questionnaire_id)
            .await
            .unwrap()
            .into_iter()
            .map(|q| (q.id, q.position))
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec![(a.id, 0), (c.id, 1)]);
        assert!(svc.get_question(&b.id).await.unwrap_err().is_not_found());
    }
}
