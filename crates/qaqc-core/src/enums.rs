//! Status enums, catalog enums, relations, and verdicts for qaqc.
//!
//! Wire values are the labels used by the console and its REST API
//! (`"Not Started"`, `"Not Equals"`, `">"`, `"Passed"`), so every enum carries
//! explicit `#[serde(rename = ...)]` attributes. `as_str()` returns the same
//! label, and `FromStr` accepts the label case-insensitively with `_`, `-` and
//! spaces treated alike (so CLI users can type `not-started` or `sv_sampling`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Fold a label into a comparable key: lowercase, separators collapsed to `_`.
fn label_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn parse_label<T: Copy>(
    raw: &str,
    field: &str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
) -> Result<T, CoreError> {
    let key = label_key(raw);
    all.iter()
        .copied()
        .find(|candidate| label_key(as_str(*candidate)) == key)
        .ok_or_else(|| {
            let expected = all.iter().map(|v| as_str(*v)).collect::<Vec<_>>().join(", ");
            CoreError::Validation(format!("invalid {field} '{raw}' (expected one of: {expected})"))
        })
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project. Any status may follow any other; the
/// console edits it freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [Self; 4] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "project status", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Kind of field activity. Drives which document types an event requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EventType {
    #[serde(rename = "PVV")]
    Pvv,
    #[serde(rename = "GWMS")]
    Gwms,
    #[serde(rename = "Drilling")]
    Drilling,
    #[serde(rename = "SV_Sampling")]
    SvSampling,
    #[serde(rename = "Excavation")]
    Excavation,
    #[serde(rename = "Survey")]
    Survey,
}

impl EventType {
    pub const ALL: [Self; 6] = [
        Self::Pvv,
        Self::Gwms,
        Self::Drilling,
        Self::SvSampling,
        Self::Excavation,
        Self::Survey,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pvv => "PVV",
            Self::Gwms => "GWMS",
            Self::Drilling => "Drilling",
            Self::SvSampling => "SV_Sampling",
            Self::Excavation => "Excavation",
            Self::Survey => "Survey",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "event type", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// DocumentStatus
// ---------------------------------------------------------------------------

/// Processing status of an uploaded document.
///
/// ```text
/// not_uploaded → processing → parsed
///                           → failed → processing (re-processed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DocumentStatus {
    #[serde(rename = "Not Uploaded")]
    NotUploaded,
    #[serde(rename = "Processing")]
    Processing,
    #[serde(rename = "Parsed")]
    Parsed,
    #[serde(rename = "Failed")]
    Failed,
}

impl DocumentStatus {
    pub const ALL: [Self; 4] = [
        Self::NotUploaded,
        Self::Processing,
        Self::Parsed,
        Self::Failed,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotUploaded | Self::Failed => &[Self::Processing],
            Self::Processing => &[Self::Parsed, Self::Failed],
            Self::Parsed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotUploaded => "Not Uploaded",
            Self::Processing => "Processing",
            Self::Parsed => "Parsed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "document status", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// FileFormat
// ---------------------------------------------------------------------------

/// Format of the uploaded source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FileFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Excel")]
    Excel,
    #[serde(rename = "Word")]
    Word,
    #[serde(rename = "CSV")]
    Csv,
    #[serde(rename = "Image")]
    Image,
}

impl FileFormat {
    pub const ALL: [Self; 5] = [Self::Pdf, Self::Excel, Self::Word, Self::Csv, Self::Image];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Excel => "Excel",
            Self::Word => "Word",
            Self::Csv => "CSV",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "file format", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// Relation
// ---------------------------------------------------------------------------

/// Comparison applied by a question between its left and right operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Relation {
    #[serde(rename = "Equals")]
    Equals,
    #[serde(rename = "Not Equals")]
    NotEquals,
    #[serde(rename = "Contains")]
    Contains,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
}

impl Relation {
    pub const ALL: [Self; 5] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::GreaterThan,
        Self::LessThan,
    ];

    /// Whether the relation compares its operands as numbers.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "Not Equals",
            Self::Contains => "Contains",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "=" | "==" | "eq" => Ok(Self::Equals),
            "!=" | "<>" | "ne" => Ok(Self::NotEquals),
            "gt" | "greater_than" => Ok(Self::GreaterThan),
            "lt" | "less_than" => Ok(Self::LessThan),
            _ => parse_label(s, "relation", &Self::ALL, Self::as_str),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Pass/fail outcome of one question, or of a whole process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Verdict {
    #[serde(rename = "Passed")]
    Passed,
    #[serde(rename = "Failed")]
    Failed,
}

impl Verdict {
    pub const ALL: [Self; 2] = [Self::Passed, Self::Failed];

    /// Aggregate per-question verdicts: `Passed` iff every verdict passed.
    ///
    /// An empty iterator yields `Passed`; callers that need at least one
    /// question reject empty questionnaires before running.
    pub fn all_passed<I>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        if verdicts.into_iter().all(|v| v == Self::Passed) {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    #[must_use]
    pub const fn from_bool(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s, "result", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// FailureReason
// ---------------------------------------------------------------------------

/// Machine-readable cause attached to a failed question result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Both operands resolved; the relation does not hold.
    Mismatch,
    /// The event has no document of the referenced type.
    MissingDocument,
    /// The document exists but has not been parsed yet.
    UnparsedDocument,
    /// The document's parsing failed.
    ParseFailed,
    /// The document was parsed but the property is absent or null.
    MissingProperty,
    /// An ordering relation was applied to a non-numeric operand.
    NonNumeric,
}

impl FailureReason {
    pub const ALL: [Self; 6] = [
        Self::Mismatch,
        Self::MissingDocument,
        Self::UnparsedDocument,
        Self::ParseFailed,
        Self::MissingProperty,
        Self::NonNumeric,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mismatch => "mismatch",
            Self::MissingDocument => "missing_document",
            Self::UnparsedDocument => "unparsed_document",
            Self::ParseFailed => "parse_failed",
            Self::MissingProperty => "missing_property",
            Self::NonNumeric => "non_numeric",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// All entity types in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Event,
    DocumentType,
    Document,
    Questionnaire,
    Question,
    Process,
    Result,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Event => "event",
            Self::DocumentType => "document_type",
            Self::Document => "document",
            Self::Questionnaire => "questionnaire",
            Self::Question => "question",
            Self::Process => "process",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
