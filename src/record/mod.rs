pub mod build;
pub mod columns;
pub mod types;

pub use build::{build_record, has_meaningful_answer};
pub use types::{Answer, AnswerMap, SurveyRecord};
