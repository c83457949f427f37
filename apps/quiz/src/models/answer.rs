use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::QuizError;

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;
/// Midpoint of the scale; an answer of exactly this value carries no signal.
pub const LIKERT_NEUTRAL: u8 = 3;

/// Answers for one quiz attempt: question id → Likert value in `1..=5`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, i64>", into = "HashMap<String, u8>")]
pub struct Answers(HashMap<String, u8>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or overwrites) the answer for `question_id`.
    pub fn record(&mut self, question_id: impl Into<String>, value: i64) -> Result<(), QuizError> {
        let value = validate_likert(value)?;
        self.0.insert(question_id.into(), value);
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.0.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn validate_likert(value: i64) -> Result<u8, QuizError> {
    if (LIKERT_MIN as i64..=LIKERT_MAX as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(QuizError::InvalidParameter(format!(
            "Answer value {value} outside {LIKERT_MIN}..={LIKERT_MAX}"
        )))
    }
}

impl TryFrom<HashMap<String, i64>> for Answers {
    type Error = QuizError;

    fn try_from(raw: HashMap<String, i64>) -> Result<Self, Self::Error> {
        let mut answers = Answers::new();
        for (id, value) in raw {
            answers.record(id, value)?;
        }
        Ok(answers)
    }
}

impl From<Answers> for HashMap<String, u8> {
    fn from(answers: Answers) -> Self {
        answers.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_full_scale() {
        let mut answers = Answers::new();
        for v in 1..=5 {
            answers.record(format!("q{v}"), v).unwrap();
        }
        assert_eq!(answers.len(), 5);
        assert_eq!(answers.get("q3"), Some(LIKERT_NEUTRAL));
    }

    #[test]
    fn test_record_rejects_out_of_range() {
        let mut answers = Answers::new();
        assert!(matches!(
            answers.record("q1", 0),
            Err(QuizError::InvalidParameter(_))
        ));
        assert!(answers.record("q1", 6).is_err());
        assert!(answers.is_empty());
    }

    #[test]
    fn test_deserialize_validates_values() {
        let ok: Answers = serde_json::from_str(r#"{"q1": 5, "q2": 1}"#).unwrap();
        assert_eq!(ok.get("q1"), Some(5));

        let bad = serde_json::from_str::<Answers>(r#"{"q1": 9}"#);
        assert!(bad.is_err());
    }
}
