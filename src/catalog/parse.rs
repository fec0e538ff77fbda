use std::collections::BTreeSet;

use crate::record::columns::column_for;

use super::types::Question;

const QUESTIONS_JSON: &str = include_str!("../../data/questions.json");

/// The catalog ships with the binary and is parsed once at startup.
pub fn load() -> Result<Vec<Question>, String> {
    parse_catalog(QUESTIONS_JSON)
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Question>, String> {
    let questions: Vec<Question> =
        serde_json::from_str(raw).map_err(|e| format!("Invalid questions JSON: {e}"))?;

    if questions.is_empty() {
        return Err("Question catalog is empty".to_string());
    }

    let mut seen: BTreeSet<u32> = BTreeSet::new();
    for question in &questions {
        if !seen.insert(question.id) {
            return Err(format!("Duplicate question id {}", question.id));
        }
        if question.label.trim().is_empty() {
            return Err(format!("Question {} has an empty label", question.id));
        }
        if question.is_choice() && question.options.is_empty() {
            return Err(format!(
                "Question {} is a choice question but has no options",
                question.id
            ));
        }
        if column_for(question.id).is_none() {
            return Err(format!(
                "Question {} has no storage column mapping",
                question.id
            ));
        }
    }

    // Ids define display order.
    let ordered = questions.windows(2).all(|pair| pair[0].id < pair[1].id);
    if !ordered {
        return Err("Question catalog is not ordered by id".to_string());
    }

    Ok(questions)
}
