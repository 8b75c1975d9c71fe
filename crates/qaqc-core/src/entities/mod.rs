//! Entity structs for all qaqc domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `qaqc-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation, using the field
//! names of the console's REST API.

mod document;
mod document_type;
mod event;
mod process;
mod project;
mod question;
mod questionnaire;

pub use document::Document;
pub use document_type::DocumentType;
pub use event::Event;
pub use process::{QaqcProcess, QuestionResult};
pub use project::Project;
pub use question::{NewQuestion, Question, RightOperand, validate_operand_properties};
pub use questionnaire::{Questionnaire, QuestionnaireDetail};
