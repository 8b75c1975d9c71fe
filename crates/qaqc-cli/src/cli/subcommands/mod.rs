mod doctype;
mod document;
mod event;
mod process;
mod project;
mod question;
mod questionnaire;

pub use doctype::DoctypeCommands;
pub use document::DocumentCommands;
pub use event::EventCommands;
pub use process::ProcessCommands;
pub use project::ProjectCommands;
pub use question::{QuestionAddArgs, QuestionCommands, QuestionUpdateArgs, RightOperandArgs};
pub use questionnaire::QuestionnaireCommands;
