//! Question evaluation.
//!
//! The evaluator compares two resolved operands under a question's relation.
//! It is a pure function of its inputs: operand resolution (which document,
//! whether it is parsed) belongs to [`crate::runner`].
//!
//! Comparison semantics are fixed by an [`EvaluationPolicy`]:
//!
//! | Relation     | Semantics |
//! |--------------|-----------|
//! | `Equals`     | text equality; numeric under [`EqualityMode::Numeric`] if both parse |
//! | `Not Equals` | negation of `Equals` under the same policy |
//! | `Contains`   | left contains right, case per [`CaseSensitivity`] |
//! | `>` / `<`    | numeric; a non-numeric operand is an [`EvaluationError`] |

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Question, RightOperand};
use crate::enums::{Relation, Verdict};

/// How `Equals` / `Not Equals` treat numeric-looking operands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMode {
    /// Case-sensitive text comparison; `"6.80" != "6.8"`.
    #[default]
    Exact,
    /// Numeric comparison when both operands parse as numbers; `"6.80" == "6.8"`.
    Numeric,
}

/// Case handling for `Contains`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// What a run does with a document whose parsing failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailurePolicy {
    /// The dependent question fails with reason `parse_failed`.
    #[default]
    FailQuestion,
    /// The whole run is rejected and no process is recorded.
    AbortRun,
}

/// Tunable comparison semantics, loaded from the `[evaluation]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationPolicy {
    #[serde(default)]
    pub equality: EqualityMode,
    #[serde(default)]
    pub contains_case: CaseSensitivity,
    #[serde(default = "default_trim_whitespace")]
    pub trim_whitespace: bool,
    #[serde(default)]
    pub parse_failure: ParseFailurePolicy,
}

const fn default_trim_whitespace() -> bool {
    true
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            equality: EqualityMode::default(),
            contains_case: CaseSensitivity::default(),
            trim_whitespace: default_trim_whitespace(),
            parse_failure: ParseFailurePolicy::default(),
        }
    }
}

/// Comparison that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// An ordering relation met an operand that is not a finite number.
    #[error("non-numeric comparison: '{value}' cannot be compared with '{relation}'")]
    NonNumeric { relation: Relation, value: String },
}

/// Verdict of a single comparison plus its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Verdict,
    /// Empty when passed.
    pub comment: String,
}

/// Parse an operand as a finite number.
///
/// Surrounding whitespace makes the operand non-numeric; [`Evaluator::compare`]
/// strips it beforehand only when `trim_whitespace` is set.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Applies relations under a fixed [`EvaluationPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    policy: EvaluationPolicy,
}

impl Evaluator {
    #[must_use]
    pub const fn new(policy: EvaluationPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &EvaluationPolicy {
        &self.policy
    }

    /// Whether `left <relation> right` holds.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::NonNumeric`] when `>` or `<` is applied to
    /// an operand that does not parse as a number.
    pub fn compare(
        &self,
        relation: Relation,
        left: &str,
        right: &str,
    ) -> Result<bool, EvaluationError> {
        let (left, right) = if self.policy.trim_whitespace {
            (left.trim(), right.trim())
        } else {
            (left, right)
        };

        match relation {
            Relation::Equals => Ok(self.equals(left, right)),
            Relation::NotEquals => Ok(!self.equals(left, right)),
            Relation::Contains => Ok(match self.policy.contains_case {
                CaseSensitivity::Sensitive => left.contains(right),
                CaseSensitivity::Insensitive => {
                    left.to_lowercase().contains(&right.to_lowercase())
                }
            }),
            Relation::GreaterThan | Relation::LessThan => {
                let l = numeric_operand(relation, left)?;
                let r = numeric_operand(relation, right)?;
                Ok(if relation == Relation::GreaterThan {
                    l > r
                } else {
                    l < r
                })
            }
        }
    }

    /// Evaluate `question` against resolved operand text.
    ///
    /// `right` is the value of `property_2` for document-based questions and
    /// the comparison value otherwise.
    ///
    /// # Errors
    ///
    /// Propagates [`EvaluationError`] from [`Evaluator::compare`].
    pub fn evaluate(
        &self,
        question: &Question,
        left: &str,
        right: &str,
    ) -> Result<Outcome, EvaluationError> {
        if self.compare(question.relation, left, right)? {
            return Ok(Outcome {
                status: Verdict::Passed,
                comment: String::new(),
            });
        }

        let right_label = match &question.right {
            RightOperand::DocumentProperty { property_2, .. } => property_2.clone(),
            RightOperand::FixedValue { comparison_value } => format!("\"{comparison_value}\""),
        };
        Ok(Outcome {
            status: Verdict::Failed,
            comment: format!(
                "expected {} {} {right_label}, got \"{left}\" vs \"{right}\"",
                question.property_1, question.relation
            ),
        })
    }

    fn equals(&self, left: &str, right: &str) -> bool {
        if self.policy.equality == EqualityMode::Numeric {
            if let (Some(l), Some(r)) = (parse_number(left), parse_number(right)) {
                #[allow(clippy::float_cmp)]
                return l == r;
            }
        }
        left == right
    }
}

fn numeric_operand(relation: Relation, value: &str) -> Result<f64, EvaluationError> {
    parse_number(value).ok_or_else(|| EvaluationError::NonNumeric {
        relation,
        value: value.to_string(),
    })
}
