//! Document type catalog.

use chrono::Utc;
use qaqc_core::entities::DocumentType;
use qaqc_core::enums::{EntityType, EventType};
use qaqc_core::ids::PREFIX_DOCUMENT_TYPE;
use qaqc_core::values::validate_property_names;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_json, to_json};
use crate::service::QaqcService;

const SELECT_COLS: &str = "id, name, properties, required_for";

fn row_to_document_type(row: &libsql::Row) -> Result<DocumentType, DatabaseError> {
    Ok(DocumentType {
        id: row.get(0)?,
        name: row.get(1)?,
        properties: parse_json(&row.get::<String>(2)?)?,
        required_for: parse_json(&row.get::<String>(3)?)?,
    })
}

impl QaqcService {
    pub async fn create_document_type(
        &self,
        name: &str,
        properties: Vec<String>,
        required_for: Vec<EventType>,
    ) -> Result<DocumentType, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::validation("document type name is required"));
        }
        validate_property_names(&properties)?;
        if self.find_document_type_by_name(name).await?.is_some() {
            return Err(DatabaseError::validation(format!(
                "document type '{name}' already exists"
            )));
        }

        let id = self.db().generate_id(PREFIX_DOCUMENT_TYPE).await?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO document_types (id, name, properties, required_for, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    name,
                    to_json(&properties)?,
                    to_json(&required_for)?,
                    format_datetime(&Utc::now())
                ],
            )
            .await?;

        Ok(DocumentType {
            id,
            name: name.to_string(),
            properties,
            required_for,
        })
    }

    pub async fn get_document_type(&self, id: &str) -> Result<DocumentType, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM document_types WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::DocumentType, id))?;
        row_to_document_type(&row)
    }

    pub async fn find_document_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DocumentType>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM document_types WHERE name = ?1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_document_type(&row)?)),
            None => Ok(None),
        }
    }

    /// Whole catalog, by name.
    pub async fn list_document_types(&self) -> Result<Vec<DocumentType>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM document_types ORDER BY name"),
                (),
            )
            .await?;
        let mut types = Vec::new();
        while let Some(row) = rows.next().await? {
            types.push(row_to_document_type(&row)?);
        }
        Ok(types)
    }
}
