pub mod dispatch;
pub mod doctype;
pub mod document;
pub mod event;
pub mod process;
pub mod project;
pub mod question;
pub mod questionnaire;
pub mod schema;
pub mod shared;
