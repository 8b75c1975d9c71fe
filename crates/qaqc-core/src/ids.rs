//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, e.g. `prc-a3f8b2c1`.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_DOCUMENT_TYPE: &str = "dty";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_QUESTIONNAIRE: &str = "qnr";
pub const PREFIX_QUESTION: &str = "qst";
pub const PREFIX_PROCESS: &str = "prc";
pub const PREFIX_RESULT: &str = "res";

/// All prefixes, for exhaustive ID generation tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_EVENT,
    PREFIX_DOCUMENT_TYPE,
    PREFIX_DOCUMENT,
    PREFIX_QUESTIONNAIRE,
    PREFIX_QUESTION,
    PREFIX_PROCESS,
    PREFIX_RESULT,
];

/// Check that `id` has the shape `{prefix}-{hex}`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
