use clap::Subcommand;

/// Project entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        client: String,
        #[arg(long)]
        location: String,
        /// Defaults to "Not Started".
        #[arg(long)]
        status: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        start_date: String,
        /// YYYY-MM-DD; omit for an ongoing project.
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Update a project.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long, conflicts_with = "ongoing")]
        end_date: Option<String>,
        /// Clear the end date.
        #[arg(long)]
        ongoing: bool,
    },
    /// List projects.
    List {
        /// Case-insensitive match on name or client.
        #[arg(long)]
        search: Option<String>,
        /// Start year.
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a project by ID.
    Get { id: String },
    /// Distinct start years, newest first.
    Years,
}
