use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    DoctypeCommands, DocumentCommands, EventCommands, ProcessCommands, ProjectCommands,
    QuestionCommands, QuestionnaireCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Field events of a project.
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Document type catalog.
    Doctype {
        #[command(subcommand)]
        action: DoctypeCommands,
    },
    /// Documents uploaded for an event.
    Document {
        #[command(subcommand)]
        action: DocumentCommands,
    },
    /// Questionnaires.
    Questionnaire {
        #[command(subcommand)]
        action: QuestionnaireCommands,
    },
    /// Questions of a questionnaire.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// QA/QC processes.
    Process {
        #[command(subcommand)]
        action: ProcessCommands,
    },
    /// Dump JSON schema for an entity type.
    Schema(SchemaArgs),
}

/// Arguments for `qaqc schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity name, e.g. `project`, `question`, `process`.
    pub type_name: String,
}
