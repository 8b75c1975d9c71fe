//! Event update builder.

use chrono::NaiveDateTime;
use qaqc_core::enums::EventType;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<EventType>>,
}

pub struct EventUpdateBuilder(EventUpdate);

impl EventUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EventUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn start_datetime(mut self, start: NaiveDateTime) -> Self {
        self.0.start_datetime = Some(start);
        self
    }

    #[must_use]
    pub const fn end_datetime(mut self, end: NaiveDateTime) -> Self {
        self.0.end_datetime = Some(end);
        self
    }

    #[must_use]
    pub fn event_types(mut self, event_types: Vec<EventType>) -> Self {
        self.0.event_types = Some(event_types);
        self
    }

    #[must_use]
    pub fn build(self) -> EventUpdate {
        self.0
    }
}

impl Default for EventUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
