use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A single answer value. Text questions and single-choice questions store a
/// string; multi-choice questions store the selected options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    pub fn is_meaningful(&self) -> bool {
        match self {
            Answer::Text(value) => !value.is_empty(),
            Answer::Choices(values) => !values.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(value) => Some(value),
            Answer::Choices(_) => None,
        }
    }
}

/// Per-session mapping from question id to the current answer.
pub type AnswerMap = HashMap<u32, Answer>;

/// Flattened payload sent to storage, keyed by column name.
pub type SurveyRecord = BTreeMap<String, Answer>;
