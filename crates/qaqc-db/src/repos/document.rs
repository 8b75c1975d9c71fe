//! Document repository: upload records, parsed values, status transitions.

use chrono::Utc;
use qaqc_core::entities::Document;
use qaqc_core::enums::{DocumentStatus, EntityType, FileFormat};
use qaqc_core::errors::CoreError;
use qaqc_core::ids::PREFIX_DOCUMENT;
use qaqc_core::values::{PropertyValues, validate_property_values};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_enum, parse_json, to_json};
use crate::service::QaqcService;

const SELECT_COLS: &str = "id, event_id, document_type_id, file_name, file_format, \
     properties_values, status, created_at, updated_at";

fn row_to_document(row: &libsql::Row) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: row.get(0)?,
        event_id: row.get(1)?,
        document_type_id: row.get(2)?,
        file_name: row.get(3)?,
        file_format: parse_enum(&row.get::<String>(4)?)?,
        properties_values: parse_json(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub event_id: String,
    pub document_type_id: String,
    pub file_name: String,
    pub file_format: FileFormat,
}

impl QaqcService {
    /// Register an upload. The document starts `Not Uploaded` with no values.
    pub async fn create_document(&self, new: NewDocument) -> Result<Document, DatabaseError> {
        if new.file_name.trim().is_empty() {
            return Err(DatabaseError::validation("file name is required"));
        }
        self.get_event(&new.event_id).await?;
        self.get_document_type(&new.document_type_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DOCUMENT).await?;
        let values = PropertyValues::new();
        let status = DocumentStatus::NotUploaded;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO documents ({SELECT_COLS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    new.event_id.as_str(),
                    new.document_type_id.as_str(),
                    new.file_name.as_str(),
                    new.file_format.as_str(),
                    to_json(&values)?,
                    status.as_str(),
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(Document {
            id,
            event_id: new.event_id,
            document_type_id: new.document_type_id,
            file_name: new.file_name,
            file_format: new.file_format,
            properties_values: values,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_document(&self, id: &str) -> Result<Document, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM documents WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Document, id))?;
        row_to_document(&row)
    }

    /// An event's documents in creation order.
    pub async fn list_documents(&self, event_id: &str) -> Result<Vec<Document>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM documents WHERE event_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [event_id],
            )
            .await?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            documents.push(row_to_document(&row)?);
        }
        Ok(documents)
    }

    /// Replace the parsed values. Every key must be declared by the type.
    pub async fn set_document_values(
        &self,
        document_id: &str,
        values: PropertyValues,
    ) -> Result<Document, DatabaseError> {
        let document = self.get_document(document_id).await?;
        let doc_type = self.get_document_type(&document.document_type_id).await?;
        validate_property_values(&doc_type.properties, &values)?;

        self.db()
            .conn()
            .execute(
                "UPDATE documents SET properties_values = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![to_json(&values)?, format_datetime(&Utc::now()), document_id],
            )
            .await?;

        self.get_document(document_id).await
    }

    /// Move a document through its processing lifecycle.
    pub async fn set_document_status(
        &self,
        document_id: &str,
        status: DocumentStatus,
    ) -> Result<Document, DatabaseError> {
        let document = self.get_document(document_id).await?;
        if !document.status.can_transition_to(status) {
            return Err(CoreError::InvalidTransition {
                entity_type: EntityType::Document.as_str().to_string(),
                id: document_id.to_string(),
                from: document.status.to_string(),
                to: status.to_string(),
            }
            .into());
        }

        self.db()
            .conn()
            .execute(
                "UPDATE documents SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![status.as_str(), format_datetime(&Utc::now()), document_id],
            )
            .await?;

        self.get_document(document_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_test_document_type, create_test_event, create_test_project, date, test_service,
    };
    use pretty_assertions::assert_eq;
    use qaqc_core::enums::EventType;
    use qaqc_core::values::PropertyValue;

    async fn setup(svc: &QaqcService) -> (String, String) {
        let project = create_test_project(svc, "Harbor", date(2024, 1, 1)).await;
        let event = create_test_event(svc, &project.id, vec![EventType::Gwms]).await;
        let doc_type = create_test_document_type(
            svc,
            "Groundwater Monitoring",
            &["Well_ID", "pH"],
            vec![EventType::Gwms],
        )
        .await;
        (event.id, doc_type.id)
    }

    fn upload(event_id: &str, type_id: &str) -> NewDocument {
        NewDocument {
            event_id: event_id.into(),
            document_type_id: type_id.into(),
            file_name: "gw.xlsx".into(),
            file_format: FileFormat::Excel,
        }
    }

    #[tokio::test]
    async fn new_document_starts_not_uploaded() {
        let svc = test_service().await;
        let (event_id, type_id) = setup(&svc).await;
        let doc = svc.create_document(upload(&event_id, &type_id)).await.unwrap();

        assert!(doc.id.starts_with("doc-"));
        assert_eq!(doc.status, DocumentStatus::NotUploaded);
        assert!(doc.properties_values.is_empty());
        assert_eq!(svc.get_document(&doc.id).await.unwrap(), doc);
    }

    #[tokio::test]
    async fn unknown_type_rejected() {
        let svc = test_service().await;
        let (event_id, _) = setup(&svc).await;
        let result = svc.create_document(upload(&event_id, "dty-00000000")).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn values_are_a_closed_map() {
        let svc = test_service().await;
        let (event_id, type_id) = setup(&svc).await;
        let doc = svc.create_document(upload(&event_id, &type_id)).await.unwrap();

        let mut values = PropertyValues::new();
        values.insert("pH".into(), PropertyValue::Number(6.8));
        let stored = svc.set_document_values(&doc.id, values.clone()).await.unwrap();
        assert_eq!(stored.properties_values, values);

        values.insert("Depth".into(), PropertyValue::Number(12.0));
        let result = svc.set_document_values(&doc.id, values).await;
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn status_follows_lifecycle() {
        let svc = test_service().await;
        let (event_id, type_id) = setup(&svc).await;
        let doc = svc.create_document(upload(&event_id, &type_id)).await.unwrap();

        let skipped = svc.set_document_status(&doc.id, DocumentStatus::Parsed).await;
        assert!(matches!(
            skipped,
            Err(DatabaseError::Core(CoreError::InvalidTransition { .. }))
        ));

        svc.set_document_status(&doc.id, DocumentStatus::Processing).await.unwrap();
        svc.set_document_status(&doc.id, DocumentStatus::Failed).await.unwrap();
        svc.set_document_status(&doc.id, DocumentStatus::Processing).await.unwrap();
        let parsed = svc.set_document_status(&doc.id, DocumentStatus::Parsed).await.unwrap();
        assert!(parsed.is_parsed());
    }

    #[tokio::test]
    async fn list_documents_in_creation_order() {
        let svc = test_service().await;
        let (event_id, type_id) = setup(&svc).await;
        let first = svc.create_document(upload(&event_id, &type_id)).await.unwrap();
        let second = svc.create_document(upload(&event_id, &type_id)).await.unwrap();

        let ids = svc
            .list_documents(&event_id)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [first.id, second.id]);
    }
}
