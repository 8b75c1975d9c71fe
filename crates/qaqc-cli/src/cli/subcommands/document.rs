use clap::Subcommand;

/// Document entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DocumentCommands {
    /// Register a document for an event.
    Create {
        #[arg(long)]
        event: String,
        /// Document type ID or name.
        #[arg(long)]
        doctype: String,
        #[arg(long)]
        file_name: String,
        /// PDF, Excel, Word, CSV or Image.
        #[arg(long = "file-format")]
        file_format: String,
    },
    /// Get a document by ID.
    Get { id: String },
    /// List documents of an event.
    List {
        #[arg(long)]
        event: String,
    },
    /// Replace the extracted property values.
    SetValues {
        id: String,
        /// JSON object keyed by property name.
        #[arg(long)]
        values: String,
    },
    /// Move the document to another processing status.
    SetStatus {
        id: String,
        #[arg(long)]
        status: String,
    },
}
