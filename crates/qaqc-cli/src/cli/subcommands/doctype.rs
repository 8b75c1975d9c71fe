use clap::Subcommand;

/// Document type catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DoctypeCommands {
    /// Register a document type.
    Create {
        #[arg(long)]
        name: String,
        /// Extractable property; repeat for several, order is kept.
        #[arg(long = "property", required = true)]
        properties: Vec<String>,
        /// Event types requiring this document.
        #[arg(long, value_delimiter = ',')]
        required_for: Vec<String>,
    },
    /// Get a document type by ID or name.
    Get { id: String },
    /// List the catalog.
    List,
}
