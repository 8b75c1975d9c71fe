use clap::Subcommand;

/// QA/QC process commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProcessCommands {
    /// Run a questionnaire against an event's documents and record it.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        event: String,
        #[arg(long)]
        questionnaire: String,
    },
    /// Re-evaluate a process against the current documents.
    Rerun { id: String },
    /// Get a process with its results.
    Get { id: String },
    /// Failed results of a process.
    Failures { id: String },
    /// List processes, most recent first.
    List {
        #[arg(long)]
        event: Option<String>,
        #[arg(long)]
        questionnaire: Option<String>,
        /// Passed or Failed.
        #[arg(long)]
        result: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}
