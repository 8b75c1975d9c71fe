//! Process runner: evaluates every question of a questionnaire against the
//! documents of one event and aggregates the verdicts.
//!
//! The runner works on a snapshot (questions, documents, document types)
//! and never touches storage. Persisting the outcome is the caller's job.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::entities::{Document, DocumentType, Question, RightOperand};
use crate::enums::{DocumentStatus, FailureReason, Verdict};
use crate::evaluation::{EvaluationError, EvaluationPolicy, Evaluator, ParseFailurePolicy};

/// A run that could not produce a process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// A referenced document failed parsing and the policy is `abort_run`.
    #[error("document {document_id} ('{file_name}') failed parsing; run aborted")]
    ParseFailed {
        document_id: String,
        file_name: String,
    },
}

/// Outcome of one question, before it is given a result id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub status: Verdict,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl QuestionOutcome {
    fn passed(question_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            status: Verdict::Passed,
            comment: String::new(),
            reason: None,
        }
    }

    fn failed(question_id: &str, reason: FailureReason, comment: String) -> Self {
        Self {
            question_id: question_id.to_string(),
            status: Verdict::Failed,
            comment,
            reason: Some(reason),
        }
    }
}

/// Aggregate verdict plus one outcome per question, in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub result: Verdict,
    pub results: Vec<QuestionOutcome>,
}

impl RunOutcome {
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == Verdict::Failed)
            .count()
    }
}

/// Evaluates questionnaires under a fixed [`EvaluationPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    evaluator: Evaluator,
}

/// Operand that could not be resolved to a value.
enum Unresolved {
    Failed(FailureReason, String),
    Abort(RunError),
}

impl ProcessRunner {
    #[must_use]
    pub const fn new(policy: EvaluationPolicy) -> Self {
        Self {
            evaluator: Evaluator::new(policy),
        }
    }

    /// Run `questions` against `documents`.
    ///
    /// `documents` are the event's documents; when several share a type the
    /// first parsed one by creation time wins. `document_types` is only used
    /// to name types in comments.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ParseFailed`] when a referenced document failed
    /// parsing under [`ParseFailurePolicy::AbortRun`].
    pub fn run(
        &self,
        questions: &[Question],
        documents: &[Document],
        document_types: &[DocumentType],
    ) -> Result<RunOutcome, RunError> {
        let mut ordered = questions.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|q| q.position);

        let mut by_creation = documents.iter().collect::<Vec<_>>();
        by_creation.sort_by_key(|d| d.created_at);

        let names = document_types
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect::<HashMap<_, _>>();

        let ctx = Snapshot {
            documents: by_creation,
            names,
            parse_failure: self.evaluator.policy().parse_failure,
        };

        let results = ordered
            .into_iter()
            .map(|question| self.run_question(question, &ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RunOutcome {
            result: Verdict::all_passed(results.iter().map(|r| r.status)),
            results,
        })
    }

    fn run_question(
        &self,
        question: &Question,
        ctx: &Snapshot<'_>,
    ) -> Result<QuestionOutcome, RunError> {
        let id = question.id.as_str();

        let left = match ctx.resolve(&question.document_1_id, &question.property_1) {
            Ok(value) => value,
            Err(Unresolved::Failed(reason, comment)) => {
                return Ok(QuestionOutcome::failed(id, reason, comment));
            }
            Err(Unresolved::Abort(error)) => return Err(error),
        };

        let right = match &question.right {
            RightOperand::FixedValue { comparison_value } => comparison_value.clone(),
            RightOperand::DocumentProperty {
                document_2_id,
                property_2,
            } => match ctx.resolve(document_2_id, property_2) {
                Ok(value) => value,
                Err(Unresolved::Failed(reason, comment)) => {
                    return Ok(QuestionOutcome::failed(id, reason, comment));
                }
                Err(Unresolved::Abort(error)) => return Err(error),
            },
        };

        Ok(match self.evaluator.evaluate(question, &left, &right) {
            Ok(outcome) if outcome.status == Verdict::Passed => QuestionOutcome::passed(id),
            Ok(outcome) => QuestionOutcome::failed(id, FailureReason::Mismatch, outcome.comment),
            Err(error @ EvaluationError::NonNumeric { .. }) => {
                QuestionOutcome::failed(id, FailureReason::NonNumeric, error.to_string())
            }
        })
    }
}

struct Snapshot<'a> {
    documents: Vec<&'a Document>,
    names: HashMap<&'a str, &'a str>,
    parse_failure: ParseFailurePolicy,
}

impl Snapshot<'_> {
    fn type_name<'s>(&'s self, document_type_id: &'s str) -> &'s str {
        self.names
            .get(document_type_id)
            .copied()
            .unwrap_or(document_type_id)
    }

    fn document_for(&self, document_type_id: &str) -> Option<&Document> {
        let mut candidates = self
            .documents
            .iter()
            .copied()
            .filter(|d| d.document_type_id == document_type_id)
            .peekable();
        let first = *candidates.peek()?;
        Some(candidates.find(|d| d.is_parsed()).unwrap_or(first))
    }

    fn resolve(&self, document_type_id: &str, property: &str) -> Result<String, Unresolved> {
        let type_name = self.type_name(document_type_id);

        let Some(document) = self.document_for(document_type_id) else {
            return Err(Unresolved::Failed(
                FailureReason::MissingDocument,
                format!("no '{type_name}' document uploaded for this event"),
            ));
        };

        match document.status {
            DocumentStatus::Parsed => {}
            DocumentStatus::Failed => {
                return Err(match self.parse_failure {
                    ParseFailurePolicy::FailQuestion => Unresolved::Failed(
                        FailureReason::ParseFailed,
                        format!(
                            "'{type_name}' document '{}' failed parsing",
                            document.file_name
                        ),
                    ),
                    ParseFailurePolicy::AbortRun => Unresolved::Abort(RunError::ParseFailed {
                        document_id: document.id.clone(),
                        file_name: document.file_name.clone(),
                    }),
                });
            }
            status @ (DocumentStatus::NotUploaded | DocumentStatus::Processing) => {
                return Err(Unresolved::Failed(
                    FailureReason::UnparsedDocument,
                    format!(
                        "'{type_name}' document '{}' is not parsed (status: {status})",
                        document.file_name
                    ),
                ));
            }
        }

        document
            .value_of(property)
            .and_then(|value| value.as_operand())
            .ok_or_else(|| {
                Unresolved::Failed(
                    FailureReason::MissingProperty,
                    format!(
                        "property '{property}' has no value in '{type_name}' document '{}'",
                        document.file_name
                    ),
                )
            })
    }
}
