//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, Utc};
use qaqc_core::checklist::ChecklistEntry;
use qaqc_core::entities::*;
use qaqc_core::enums::*;
use qaqc_core::pagination::Page;
use qaqc_core::values::{PropertyValue, PropertyValues};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

roundtrip_and_validate!(
    project_roundtrip,
    Project,
    Project {
        id: "prj-a3f8b2c1".into(),
        name: "Harbor Redevelopment".into(),
        client: "Port Authority".into(),
        location: "Pier 7".into(),
        status: ProjectStatus::InProgress,
        start_date: date(2024, 2, 1),
        end_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    event_roundtrip,
    Event,
    Event {
        id: "evt-0b1c2d3e".into(),
        project_id: "prj-a3f8b2c1".into(),
        name: "Monitoring well install".into(),
        start_datetime: date(2024, 3, 4).and_hms_opt(7, 30, 0).unwrap(),
        end_datetime: date(2024, 3, 4).and_hms_opt(16, 0, 0).unwrap(),
        event_types: vec![EventType::Drilling, EventType::Gwms],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    document_type_roundtrip,
    DocumentType,
    DocumentType {
        id: "dty-11223344".into(),
        name: "Groundwater Monitoring".into(),
        properties: vec!["Well_ID".into(), "pH".into(), "Temperature".into()],
        required_for: vec![EventType::Gwms],
    }
);

roundtrip_and_validate!(
    document_roundtrip,
    Document,
    Document {
        id: "doc-55667788".into(),
        event_id: "evt-0b1c2d3e".into(),
        document_type_id: "dty-11223344".into(),
        file_name: "gw-round-1.xlsx".into(),
        file_format: FileFormat::Excel,
        properties_values: PropertyValues::from([
            ("Well_ID".to_string(), PropertyValue::Text("MW-1".into())),
            ("pH".to_string(), PropertyValue::Number(6.8)),
            ("Temperature".to_string(), PropertyValue::Null),
        ]),
        status: DocumentStatus::Parsed,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    questionnaire_roundtrip,
    Questionnaire,
    Questionnaire {
        id: "qnr-99aabbcc".into(),
        name: "Groundwater QC".into(),
        description: "Field readings against lab sheet".into(),
        event_type: Some(EventType::Gwms),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    fixed_value_question_roundtrip,
    Question,
    Question {
        id: "qst-01020304".into(),
        questionnaire_id: "qnr-99aabbcc".into(),
        position: 0,
        document_1_id: "dty-11223344".into(),
        property_1: "pH".into(),
        relation: Relation::LessThan,
        right: RightOperand::FixedValue {
            comparison_value: "8.5".into(),
        },
        system_value: String::new(),
    }
);

roundtrip_and_validate!(
    document_question_roundtrip,
    Question,
    Question {
        id: "qst-05060708".into(),
        questionnaire_id: "qnr-99aabbcc".into(),
        position: 1,
        document_1_id: "dty-11223344".into(),
        property_1: "pH".into(),
        relation: Relation::NotEquals,
        right: RightOperand::DocumentProperty {
            document_2_id: "dty-11223344".into(),
            property_2: "Temperature".into(),
        },
        system_value: "6.8".into(),
    }
);

roundtrip_and_validate!(
    new_question_roundtrip,
    NewQuestion,
    NewQuestion {
        document_1_id: "dty-11223344".into(),
        property_1: "Well_ID".into(),
        relation: Relation::Contains,
        document_2_id: None,
        property_2: None,
        comparison_value: Some("MW-".into()),
        system_value: None,
    }
);

roundtrip_and_validate!(
    process_roundtrip,
    QaqcProcess,
    QaqcProcess {
        id: "prc-deadbeef".into(),
        name: "Round 1".into(),
        description: String::new(),
        time: Utc::now(),
        event_id: "evt-0b1c2d3e".into(),
        questionnaire_id: "qnr-99aabbcc".into(),
        result: Verdict::Failed,
        results: vec![
            QuestionResult {
                id: "res-00000001".into(),
                process_id: "prc-deadbeef".into(),
                question_id: "qst-01020304".into(),
                status: Verdict::Passed,
                comment: String::new(),
                reason: None,
            },
            QuestionResult {
                id: "res-00000002".into(),
                process_id: "prc-deadbeef".into(),
                question_id: "qst-05060708".into(),
                status: Verdict::Failed,
                comment: "property 'Temperature' has no value".into(),
                reason: Some(FailureReason::MissingProperty),
            },
        ],
    }
);

roundtrip_and_validate!(
    checklist_entry_roundtrip,
    ChecklistEntry,
    ChecklistEntry {
        document_type_id: "dty-11223344".into(),
        document_type_name: "Groundwater Monitoring".into(),
        required_by: vec![EventType::Gwms],
        document_id: Some("doc-55667788".into()),
        status: Some(DocumentStatus::Processing),
    }
);

roundtrip_and_validate!(
    project_page_roundtrip,
    Page<String>,
    Page::from_items(vec!["prj-1".to_string(), "prj-2".to_string()], 1, 25)
);

#[test]
fn enum_labels_match_console_vocabulary() {
    let labels = [
        serde_json::to_value(ProjectStatus::NotStarted).unwrap(),
        serde_json::to_value(EventType::SvSampling).unwrap(),
        serde_json::to_value(DocumentStatus::NotUploaded).unwrap(),
        serde_json::to_value(Relation::NotEquals).unwrap(),
        serde_json::to_value(Relation::GreaterThan).unwrap(),
    ];
    assert_eq!(
        labels,
        ["Not Started", "SV_Sampling", "Not Uploaded", "Not Equals", ">"]
            .map(serde_json::Value::from)
    );
}
