pub mod parse;
pub mod types;

pub use parse::{load, parse_catalog};
pub use types::{Question, QuestionKind};
