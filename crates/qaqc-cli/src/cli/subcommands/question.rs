use clap::{Args, Subcommand};

/// Question entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Append a question to a questionnaire.
    Add(QuestionAddArgs),
    /// Update a question.
    Update(QuestionUpdateArgs),
    /// Remove a question; later ones move up.
    Remove { id: String },
    /// Get a question by ID.
    Get { id: String },
    /// List the questions of a questionnaire in order.
    List {
        #[arg(long)]
        questionnaire: String,
    },
}

/// Right-hand side: a second document property or a fixed value.
#[derive(Clone, Debug, Default, Args)]
pub struct RightOperandArgs {
    /// Document type ID of the second operand.
    #[arg(long = "document-2", requires = "property_2", conflicts_with = "value")]
    pub document_2: Option<String>,
    #[arg(long = "property-2", requires = "document_2", conflicts_with = "value")]
    pub property_2: Option<String>,
    /// Fixed comparison value.
    #[arg(long)]
    pub value: Option<String>,
}

impl RightOperandArgs {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.document_2.is_none() && self.property_2.is_none() && self.value.is_none()
    }
}

/// Arguments for `qaqc question add`.
#[derive(Clone, Debug, Args)]
pub struct QuestionAddArgs {
    #[arg(long)]
    pub questionnaire: String,
    /// Document type ID of the first operand.
    #[arg(long = "document-1")]
    pub document_1: String,
    #[arg(long = "property-1")]
    pub property_1: String,
    /// Equals, "Not Equals", Contains, > or <.
    #[arg(long)]
    pub relation: String,
    #[command(flatten)]
    pub operand: RightOperandArgs,
    #[arg(long)]
    pub system_value: Option<String>,
}

/// Arguments for `qaqc question update`.
#[derive(Clone, Debug, Args)]
pub struct QuestionUpdateArgs {
    pub id: String,
    #[arg(long = "document-1")]
    pub document_1: Option<String>,
    #[arg(long = "property-1")]
    pub property_1: Option<String>,
    #[arg(long)]
    pub relation: Option<String>,
    #[command(flatten)]
    pub operand: RightOperandArgs,
    #[arg(long)]
    pub system_value: Option<String>,
}
