//! Shared test utilities for qaqc-db tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use qaqc_core::entities::{DocumentType, Event, Project, Questionnaire};
    use qaqc_core::enums::{DocumentStatus, EventType, FileFormat};
    use qaqc_core::evaluation::EvaluationPolicy;
    use qaqc_core::values::PropertyValues;

    use crate::QaqcDb;
    use crate::repos::document::NewDocument;
    use crate::repos::event::NewEvent;
    use crate::repos::project::NewProject;
    use crate::repos::questionnaire::NewQuestionnaire;
    use crate::service::QaqcService;

    /// In-memory service with the default evaluation policy.
    pub async fn test_service() -> QaqcService {
        test_service_with_policy(EvaluationPolicy::default()).await
    }

    pub async fn test_service_with_policy(policy: EvaluationPolicy) -> QaqcService {
        let db = QaqcDb::open_local(":memory:").await.unwrap();
        QaqcService::from_db(db, policy)
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn create_test_project(svc: &QaqcService, name: &str, start: NaiveDate) -> Project {
        svc.create_project(NewProject {
            name: name.into(),
            client: "Port Authority".into(),
            location: "Pier 7".into(),
            status: None,
            start_date: start,
            end_date: None,
        })
        .await
        .unwrap()
    }

    pub async fn create_test_event(
        svc: &QaqcService,
        project_id: &str,
        event_types: Vec<EventType>,
    ) -> Event {
        let day = date(2024, 3, 4);
        svc.create_event(NewEvent {
            project_id: project_id.into(),
            name: "Field day".into(),
            start_datetime: day.and_hms_opt(7, 0, 0).unwrap(),
            end_datetime: day.and_hms_opt(17, 0, 0).unwrap(),
            event_types,
        })
        .await
        .unwrap()
    }

    pub async fn create_test_document_type(
        svc: &QaqcService,
        name: &str,
        properties: &[&str],
        required_for: Vec<EventType>,
    ) -> DocumentType {
        svc.create_document_type(
            name,
            properties.iter().map(|p| (*p).to_string()).collect(),
            required_for,
        )
        .await
        .unwrap()
    }

    pub async fn create_test_questionnaire(
        svc: &QaqcService,
        event_type: Option<EventType>,
    ) -> Questionnaire {
        svc.create_questionnaire(NewQuestionnaire {
            name: "Field QC".into(),
            description: "Cross-document checks".into(),
            event_type,
        })
        .await
        .unwrap()
    }

    /// Upload a document and drive it to `Parsed` with the given values.
    pub async fn create_parsed_document(
        svc: &QaqcService,
        event_id: &str,
        document_type_id: &str,
        values: PropertyValues,
    ) -> String {
        let doc = svc
            .create_document(NewDocument {
                event_id: event_id.into(),
                document_type_id: document_type_id.into(),
                file_name: "upload.pdf".into(),
                file_format: FileFormat::Pdf,
            })
            .await
            .unwrap();
        svc.set_document_status(&doc.id, DocumentStatus::Processing)
            .await
            .unwrap();
        svc.set_document_values(&doc.id, values).await.unwrap();
        svc.set_document_status(&doc.id, DocumentStatus::Parsed)
            .await
            .unwrap();
        doc.id
    }
}
