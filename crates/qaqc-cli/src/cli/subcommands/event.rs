use clap::Subcommand;

/// Event entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EventCommands {
    /// Create an event for a project.
    Create {
        #[arg(long)]
        project: String,
        #[arg(long)]
        name: String,
        /// YYYY-MM-DDTHH:MM[:SS]
        #[arg(long)]
        start: String,
        /// YYYY-MM-DDTHH:MM[:SS]
        #[arg(long)]
        end: String,
        /// Event type; repeat or comma-separate for several.
        #[arg(long = "type", value_delimiter = ',', required = true)]
        types: Vec<String>,
    },
    /// Update an event.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<String>,
    },
    /// List events of a project.
    List {
        #[arg(long)]
        project: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an event by ID.
    Get { id: String },
    /// Required documents for the event and what has been uploaded.
    Checklist { id: String },
}
