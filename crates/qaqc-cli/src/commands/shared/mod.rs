pub mod doctype;
pub mod limit;
pub mod page;
pub mod parse;
