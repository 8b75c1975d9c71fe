use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventType;
use crate::errors::CoreError;

/// A scheduled field activity that produces documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub event_types: Vec<EventType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    #[must_use]
    pub fn has_type(&self, event_type: EventType) -> bool {
        self.event_types.contains(&event_type)
    }

    /// Check the schedule and tags of an event before it is stored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the window is inverted or no
    /// event type is given.
    pub fn validate_schedule(
        start: NaiveDateTime,
        end: NaiveDateTime,
        event_types: &[EventType],
    ) -> Result<(), CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "event starts after it ends ({start} > {end})"
            )));
        }
        if event_types.is_empty() {
            return Err(CoreError::validation("an event needs at least one event type"));
        }
        Ok(())
    }
}
