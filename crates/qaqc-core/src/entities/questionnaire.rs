use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Question;
use crate::enums::EventType;

/// A named set of questions, optionally scoped to one event type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Questionnaire {
    pub id: String,
    pub name: String,
    pub description: String,
    pub event_type: Option<EventType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Questionnaire {
    /// Whether the questionnaire may run against an event with these types.
    #[must_use]
    pub fn applies_to(&self, event_types: &[EventType]) -> bool {
        self.event_type.is_none_or(|scope| event_types.contains(&scope))
    }
}

/// A questionnaire with its questions in evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionnaireDetail {
    #[serde(flatten)]
    pub questionnaire: Questionnaire,
    pub questions: Vec<Question>,
    pub question_count: u32,
}
