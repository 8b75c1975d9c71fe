use clap::Subcommand;

/// Questionnaire entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionnaireCommands {
    /// Create a questionnaire.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Restrict to events of this type.
        #[arg(long)]
        event_type: Option<String>,
    },
    /// Update a questionnaire.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "unscoped")]
        event_type: Option<String>,
        /// Remove the event type restriction.
        #[arg(long)]
        unscoped: bool,
    },
    /// List questionnaires.
    List {
        /// Only those usable for this event type (unscoped ones included).
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a questionnaire by ID.
    Get {
        id: String,
        /// Include its questions in order.
        #[arg(long)]
        questions: bool,
    },
}
