//! Event repository: CRUD and the required-document checklist.

use chrono::{NaiveDateTime, Utc};
use qaqc_core::checklist::{ChecklistEntry, document_checklist};
use qaqc_core::entities::Event;
use qaqc_core::enums::{EntityType, EventType};
use qaqc_core::ids::PREFIX_EVENT;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, format_naive_datetime, parse_datetime, parse_json, parse_naive_datetime,
    to_json,
};
use crate::service::QaqcService;
use crate::updates::event::EventUpdate;

const SELECT_COLS: &str =
    "id, project_id, name, start_datetime, end_datetime, event_types, created_at, updated_at";

fn row_to_event(row: &libsql::Row) -> Result<Event, DatabaseError> {
    Ok(Event {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        start_datetime: parse_naive_datetime(&row.get::<String>(3)?)?,
        end_datetime: parse_naive_datetime(&row.get::<String>(4)?)?,
        event_types: parse_json(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub project_id: String,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub event_types: Vec<EventType>,
}

/// Drop repeated event type tags, keeping first occurrences.
fn normalize_types(mut event_types: Vec<EventType>) -> Vec<EventType> {
    let mut seen = Vec::with_capacity(event_types.len());
    event_types.retain(|t| {
        if seen.contains(t) {
            false
        } else {
            seen.push(*t);
            true
        }
    });
    event_types
}

impl QaqcService {
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, DatabaseError> {
        if new.name.trim().is_empty() {
            return Err(DatabaseError::validation("event name is required"));
        }
        let event_types = normalize_types(new.event_types);
        Event::validate_schedule(new.start_datetime, new.end_datetime, &event_types)?;
        self.get_project(&new.project_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVENT).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO events ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    new.project_id.as_str(),
                    new.name.as_str(),
                    format_naive_datetime(&new.start_datetime),
                    format_naive_datetime(&new.end_datetime),
                    to_json(&event_types)?,
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(Event {
            id,
            project_id: new.project_id,
            name: new.name,
            start_datetime: new.start_datetime,
            end_datetime: new.end_datetime,
            event_types,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM events WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Event, id))?;
        row_to_event(&row)
    }

    /// Partial update; the resulting schedule is re-validated as a whole.
    pub async fn update_event(
        &self,
        event_id: &str,
        update: EventUpdate,
    ) -> Result<Event, DatabaseError> {
        let current = self.get_event(event_id).await?;

        let name = update.name.unwrap_or(current.name);
        if name.trim().is_empty() {
            return Err(DatabaseError::validation("event name is required"));
        }
        let start = update.start_datetime.unwrap_or(current.start_datetime);
        let end = update.end_datetime.unwrap_or(current.end_datetime);
        let event_types = update
            .event_types
            .map_or(current.event_types, normalize_types);
        Event::validate_schedule(start, end, &event_types)?;

        self.db()
            .conn()
            .execute(
                "UPDATE events SET name = ?1, start_datetime = ?2, end_datetime = ?3,
                 event_types = ?4, updated_at = ?5 WHERE id = ?6",
                libsql::params![
                    name.as_str(),
                    format_naive_datetime(&start),
                    format_naive_datetime(&end),
                    to_json(&event_types)?,
                    format_datetime(&Utc::now()),
                    event_id
                ],
            )
            .await?;

        self.get_event(event_id).await
    }

    /// Events of a project in schedule order.
    pub async fn list_events(
        &self,
        project_id: &str,
        limit: u32,
    ) -> Result<Vec<Event>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM events WHERE project_id = ?1
                     ORDER BY start_datetime, created_at LIMIT {limit}"
                ),
                [project_id],
            )
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }

    /// Required document types for the event's types, with the uploaded
    /// document fulfilling each (if any).
    pub async fn document_checklist(
        &self,
        event_id: &str,
    ) -> Result<Vec<ChecklistEntry>, DatabaseError> {
        let event = self.get_event(event_id).await?;
        let catalog = self.list_document_types().await?;
        let documents = self.list_documents(event_id).await?;
        Ok(document_checklist(&event, &catalog, &documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_parsed_document, create_test_document_type, create_test_event,
        create_test_project, date, test_service,
    };
    use crate::updates::event::EventUpdateBuilder;
    use pretty_assertions::assert_eq;
    use qaqc_core::values::PropertyValues;

    #[tokio::test]
    async fn create_event_roundtrip() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "Harbor", date(2024, 1, 1)).await;
        let event = create_test_event(
            &svc,
            &project.id,
            vec![EventType::Gwms, EventType::Drilling, EventType::Gwms],
        )
        .await;

        assert!(event.id.starts_with("evt-"));
        assert_eq!(event.event_types, vec![EventType::Gwms, EventType::Drilling]);
        assert_eq!(svc.get_event(&event.id).await.unwrap(), event);
    }

    #[tokio::test]
    async fn event_requires_existing_project() {
        let svc = test_service().await;
        let day = date(2024, 3, 4);
        let result = svc
            .create_event(NewEvent {
                project_id: "prj-00000000".into(),
                name: "Orphan".into(),
                start_datetime: day.and_hms_opt(8, 0, 0).unwrap(),
                end_datetime: day.and_hms_opt(9, 0, 0).unwrap(),
                event_types: vec![EventType::Survey],
            })
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn inverted_schedule_rejected_on_update() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "Harbor", date(2024, 1, 1)).await;
        let event = create_test_event(&svc, &project.id, vec![EventType::Survey]).await;

        let update = EventUpdateBuilder::new()
            .end_datetime(date(2024, 3, 3).and_hms_opt(12, 0, 0).unwrap())
            .build();
        assert!(svc.update_event(&event.id, update).await.unwrap_err().is_validation());

        let update = EventUpdateBuilder::new().event_types(Vec::new()).build();
        assert!(svc.update_event(&event.id, update).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn list_events_by_project() {
        let svc = test_service().await;
        let a = create_test_project(&svc, "A", date(2024, 1, 1)).await;
        let b = create_test_project(&svc, "B", date(2024, 1, 1)).await;
        create_test_event(&svc, &a.id, vec![EventType::Pvv]).await;
        create_test_event(&svc, &a.id, vec![EventType::Survey]).await;
        create_test_event(&svc, &b.id, vec![EventType::Survey]).await;

        assert_eq!(svc.list_events(&a.id, 20).await.unwrap().len(), 2);
        assert_eq!(svc.list_events(&a.id, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn checklist_reports_missing_and_present_documents() {
        let svc = test_service().await;
        let project = create_test_project(&svc, "Harbor", date(2024, 1, 1)).await;
        let event =
            create_test_event(&svc, &project.id, vec![EventType::Drilling, EventType::Gwms]).await;
        let log =
            create_test_document_type(&svc, "Drilling Log", &["Depth"], vec![EventType::Drilling])
                .await;
        create_test_document_type(&svc, "Groundwater Monitoring", &["pH"], vec![EventType::Gwms])
            .await;
        create_test_document_type(&svc, "Site Survey Report", &["Area"], vec![EventType::Survey])
            .await;
        create_parsed_document(&svc, &event.id, &log.id, PropertyValues::new()).await;

        let checklist = svc.document_checklist(&event.id).await.unwrap();
        assert_eq!(checklist.len(), 2);
        assert!(checklist[0].is_satisfied());
        assert_eq!(checklist[1].document_type_name, "Groundwater Monitoring");
        assert_eq!(checklist[1].document_id, None);
    }
}
