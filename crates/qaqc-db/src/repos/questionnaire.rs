//! Questionnaire repository.

use chrono::Utc;
use qaqc_core::entities::{Questionnaire, QuestionnaireDetail};
use qaqc_core::enums::{EntityType, EventType};
use qaqc_core::ids::PREFIX_QUESTIONNAIRE;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::QaqcService;
use crate::updates::questionnaire::QuestionnaireUpdate;

const SELECT_COLS: &str = "id, name, description, event_type, created_at, updated_at";

fn row_to_questionnaire(row: &libsql::Row) -> Result<Questionnaire, DatabaseError> {
    Ok(Questionnaire {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        event_type: get_opt_string(row, 3)?
            .map(|s| parse_enum(&s))
            .transpose()?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestionnaire {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

impl QaqcService {
    pub async fn create_questionnaire(
        &self,
        new: NewQuestionnaire,
    ) -> Result<Questionnaire, DatabaseError> {
        if new.name.trim().is_empty() {
            return Err(DatabaseError::validation("questionnaire name is required"));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_QUESTIONNAIRE).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO questionnaires ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ),
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.description.as_str(),
                    new.event_type.map(EventType::as_str),
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(Questionnaire {
            id,
            name: new.name,
            description: new.description,
            event_type: new.event_type,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_questionnaire(&self, id: &str) -> Result<Questionnaire, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM questionnaires WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Questionnaire, id))?;
        row_to_questionnaire(&row)
    }

    pub async fn update_questionnaire(
        &self,
        questionnaire_id: &str,
        update: QuestionnaireUpdate,
    ) -> Result<Questionnaire, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            if name.trim().is_empty() {
                return Err(DatabaseError::validation("questionnaire name is required"));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
        }
        if let Some(event_type) = update.event_type {
            sets.push(format!("event_type = ?{idx}"));
            params.push(event_type.map_or(libsql::Value::Null, |t| t.as_str().into()));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_questionnaire(questionnaire_id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(&Utc::now()).into());
        idx += 1;

        params.push(questionnaire_id.into());
        let sql = format!(
            "UPDATE questionnaires SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(
                EntityType::Questionnaire,
                questionnaire_id,
            ));
        }

        self.get_questionnaire(questionnaire_id).await
    }

    /// Questionnaires by name. With `event_type`, only those that apply to
    /// it: scoped to that type, or unscoped.
    pub async fn list_questionnaires(
        &self,
        event_type: Option<EventType>,
        limit: u32,
    ) -> Result<Vec<Questionnaire>, DatabaseError> {
        let mut rows = match event_type {
            Some(event_type) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM questionnaires
                             WHERE event_type IS NULL OR event_type = ?1
                             ORDER BY name LIMIT {limit}"
                        ),
                        [event_type.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM questionnaires ORDER BY name LIMIT {limit}"
                        ),
                        (),
                    )
                    .await?
            }
        };
        let mut questionnaires = Vec::new();
        while let Some(row) = rows.next().await? {
            questionnaires.push(row_to_questionnaire(&row)?);
        }
        Ok(questionnaires)
    }

    /// A questionnaire with its questions in position order.
    pub async fn get_questionnaire_with_questions(
        &self,
        id: &str,
    ) -> Result<QuestionnaireDetail, DatabaseError> {
        let questionnaire = self.get_questionnaire(id).await?;
        let questions = self.list_questions(id).await?;
        let question_count = u32::try_from(questions.len())
            .map_err(|_| DatabaseError::InvalidState("question count overflow".into()))?;
        Ok(QuestionnaireDetail {
            questionnaire,
            questions,
            question_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_questionnaire, test_service};
    use crate::updates::questionnaire::QuestionnaireUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_questionnaire_roundtrip() {
        let svc = test_service().await;
        let created = create_test_questionnaire(&svc, Some(EventType::Gwms)).await;
        assert!(created.id.starts_with("qnr-"));
        assert_eq!(svc.get_questionnaire(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_can_clear_scope() {
        let svc = test_service().await;
        let created = create_test_questionnaire(&svc, Some(EventType::Gwms)).await;

        let update = QuestionnaireUpdateBuilder::new()
            .name("Generic QC")
            .event_type(None)
            .build();
        let updated = svc.update_questionnaire(&created.id, update).await.unwrap();
        assert_eq!(updated.name, "Generic QC");
        assert_eq!(updated.event_type, None);
    }

    #[tokio::test]
    async fn update_missing_questionnaire_is_not_found() {
        let svc = test_service().await;
        let update = QuestionnaireUpdateBuilder::new().name("x").build();
        let result = svc.update_questionnaire("qnr-00000000", update).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn event_type_filter_keeps_unscoped() {
        let svc = test_service().await;
        create_test_questionnaire(&svc, Some(EventType::Gwms)).await;
        create_test_questionnaire(&svc, Some(EventType::Drilling)).await;
        create_test_questionnaire(&svc, None).await;

        assert_eq!(svc.list_questionnaires(None, 20).await.unwrap().len(), 3);
        let for_gwms = svc
            .list_questionnaires(Some(EventType::Gwms), 20)
            .await
            .unwrap();
        assert_eq!(for_gwms.len(), 2);
        assert!(for_gwms.iter().all(|q| q.applies_to(&[EventType::Gwms])));
    }

    #[tokio::test]
    async fn detail_of_empty_questionnaire() {
        let svc = test_service().await;
        let created = create_test_questionnaire(&svc, None).await;
        let detail = svc.get_questionnaire_with_questions(&created.id).await.unwrap();
        assert_eq!(detail.question_count, 0);
        assert!(detail.questions.is_empty());
    }
}
