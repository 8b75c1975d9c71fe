//! Repository modules implementing the operations for every entity.
//!
//! Each module adds methods to `QaqcService` via `impl QaqcService` blocks.

pub mod document;
pub mod document_type;
pub mod event;
pub mod process;
pub mod project;
pub mod question;
pub mod questionnaire;
