//! Rule evaluation policy.
//!
//! ```toml
//! [evaluation]
//! equality = "numeric"          # or "exact"
//! contains_case = "insensitive" # or "sensitive"
//! trim_whitespace = true
//! parse_failure = "abort_run"   # or "fail_question"
//! ```

use qaqc_core::evaluation::{
    CaseSensitivity, EqualityMode, EvaluationPolicy, ParseFailurePolicy,
};
use serde::{Deserialize, Serialize};

const fn default_trim_whitespace() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub equality: EqualityMode,

    #[serde(default)]
    pub contains_case: CaseSensitivity,

    #[serde(default = "default_trim_whitespace")]
    pub trim_whitespace: bool,

    #[serde(default)]
    pub parse_failure: ParseFailurePolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::from(EvaluationPolicy::default())
    }
}

impl EvaluationConfig {
    #[must_use]
    pub const fn policy(&self) -> EvaluationPolicy {
        EvaluationPolicy {
            equality: self.equality,
            contains_case: self.contains_case,
            trim_whitespace: self.trim_whitespace,
            parse_failure: self.parse_failure,
        }
    }
}

impl From<EvaluationPolicy> for EvaluationConfig {
    fn from(policy: EvaluationPolicy) -> Self {
        Self {
            equality: policy.equality,
            contains_case: policy.contains_case,
            trim_whitespace: policy.trim_whitespace,
            parse_failure: policy.parse_failure,
        }
    }
}
