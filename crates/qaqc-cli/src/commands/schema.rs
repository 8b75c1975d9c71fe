use qaqc_core::checklist::ChecklistEntry;
use qaqc_core::entities::{
    Document, DocumentType, Event, NewQuestion, Project, QaqcProcess, Question, Questionnaire,
    QuestionResult,
};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

pub const SCHEMA_TYPES: &[&str] = &[
    "project",
    "event",
    "document_type",
    "document",
    "questionnaire",
    "question",
    "new_question",
    "process",
    "result",
    "checklist_entry",
];

/// Handle `qaqc schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.replace('-', "_").to_ascii_lowercase().as_str() {
        "project" => schema_for!(Project),
        "event" => schema_for!(Event),
        "document_type" | "doctype" => schema_for!(DocumentType),
        "document" => schema_for!(Document),
        "questionnaire" => schema_for!(Questionnaire),
        "question" => schema_for!(Question),
        "new_question" => schema_for!(NewQuestion),
        "process" => schema_for!(QaqcProcess),
        "result" => schema_for!(QuestionResult),
        "checklist_entry" => schema_for!(ChecklistEntry),
        other => anyhow::bail!(
            "unknown schema type '{other}' (expected one of: {})",
            SCHEMA_TYPES.join(", ")
        ),
    };
    output(&schema, flags.format)
}
