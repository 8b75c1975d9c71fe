use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FailureReason, Verdict};

/// Outcome of one question within one process run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionResult {
    pub id: String,
    pub process_id: String,
    pub question_id: String,
    pub status: Verdict,
    /// Empty when passed; always explains the discrepancy when failed.
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// One execution of a questionnaire against an event's documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QaqcProcess {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// When the results were last evaluated.
    pub time: DateTime<Utc>,
    pub event_id: String,
    pub questionnaire_id: String,
    pub result: Verdict,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}

impl QaqcProcess {
    /// Aggregate verdict recomputed from `results`.
    #[must_use]
    pub fn aggregate(&self) -> Verdict {
        Verdict::all_passed(self.results.iter().map(|r| r.status))
    }

    /// Results that failed, in question order.
    pub fn failures(&self) -> impl Iterator<Item = &QuestionResult> {
        self.results.iter().filter(|r| r.status == Verdict::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(question_id: &str, status: Verdict) -> QuestionResult {
        QuestionResult {
            id: format!("res-{question_id}"),
            process_id: "prc-00000001".into(),
            question_id: question_id.into(),
            status,
            comment: if status == Verdict::Failed {
                "expected match".into()
            } else {
                String::new()
            },
            reason: (status == Verdict::Failed).then_some(FailureReason::Mismatch),
        }
    }

    fn process(results: Vec<QuestionResult>) -> QaqcProcess {
        QaqcProcess {
            id: "prc-00000001".into(),
            name: "Round 1".into(),
            description: String::new(),
            time: Utc::now(),
            event_id: "evt-00000001".into(),
            questionnaire_id: "qnr-00000001".into(),
            result: Verdict::Passed,
            results,
        }
    }

    #[test]
    fn all_passed_results_aggregate_to_passed() {
        let p = process(vec![
            result("q1", Verdict::Passed),
            result("q2", Verdict::Passed),
        ]);
        assert_eq!(p.aggregate(), Verdict::Passed);
        assert_eq!(p.failures().count(), 0);
    }

    #[test]
    fn single_failure_flips_aggregate() {
        let p = process(vec![
            result("q1", Verdict::Passed),
            result("q2", Verdict::Failed),
            result("q3", Verdict::Passed),
        ]);
        assert_eq!(p.aggregate(), Verdict::Failed);
        assert_eq!(p.failures().map(|r| r.question_id.as_str()).collect::<Vec<_>>(), ["q2"]);
    }

    #[test]
    fn passed_result_omits_reason_on_the_wire() {
        let json = serde_json::to_value(result("q1", Verdict::Passed)).unwrap();
        assert_eq!(json["status"], "Passed");
        assert!(json.get("reason").is_none());
    }
}
