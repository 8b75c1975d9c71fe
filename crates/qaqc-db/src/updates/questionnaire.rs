//! Questionnaire update builder.

use qaqc_core::enums::EventType;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionnaireUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Some(None)` removes the event-type scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<Option<EventType>>,
}

pub struct QuestionnaireUpdateBuilder(QuestionnaireUpdate);

impl QuestionnaireUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(QuestionnaireUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn event_type(mut self, event_type: Option<EventType>) -> Self {
        self.0.event_type = Some(event_type);
        self
    }

    #[must_use]
    pub fn build(self) -> QuestionnaireUpdate {
        self.0
    }
}

impl Default for QuestionnaireUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
