use super::columns::column_for;
use super::types::{AnswerMap, SurveyRecord};

/// Flattens the id-keyed answers into the column-keyed storage record,
/// dropping empty values and ids without a column.
pub fn build_record(answers: &AnswerMap) -> SurveyRecord {
    let mut record = SurveyRecord::new();
    for (id, answer) in answers {
        let Some(column) = column_for(*id) else {
            continue;
        };
        if answer.is_meaningful() {
            record.insert(column.to_string(), answer.clone());
        }
    }
    record
}

pub fn has_meaningful_answer(answers: &AnswerMap) -> bool {
    answers.values().any(|answer| answer.is_meaningful())
}
