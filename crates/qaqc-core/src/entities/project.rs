use chrono::{DateTime, Datelike, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// Top-level container for a site assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub location: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    /// `None` for an ongoing project.
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start_date.year()
    }

    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    /// Case-insensitive match against name or client.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.client.to_lowercase().contains(&term)
    }
}
