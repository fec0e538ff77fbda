pub mod form;

pub use form::{SubmissionState, SurveyForm};
