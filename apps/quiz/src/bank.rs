//! Question bank loading from the seed-file format.
//!
//! The file is a JSON array of loosely-typed rows:
//! `{"dimension": "EI", "agree_pole": "E", "text": "...", "is_active": true, "source": "ai"}`.
//! Rows are normalized the same way content is normalized on entry: codes
//! trimmed and uppercased, pole cut to one letter, source capped at 20 chars.
//! Incomplete rows and duplicate `(dimension, pole, text)` rows are skipped.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::QuizError;
use crate::models::Question;

const BUILTIN_SEED_QUESTIONS: &str = include_str!("../data/seed_questions.json");
const MAX_SOURCE_CHARS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// The bank shipped with the crate (`data/seed_questions.json`).
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_json_str(BUILTIN_SEED_QUESTIONS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let bank = Self::from_json_str(&raw)?;
        info!(path = %path.display(), questions = bank.len(), "Loaded question bank");
        Ok(bank)
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let data: Value = serde_json::from_str(json)?;
        let Value::Array(rows) = data else {
            return Err(QuizError::InvalidData(
                "Seed data must be a JSON array".to_string(),
            ));
        };

        let mut seen: HashSet<(String, char, String)> = HashSet::new();
        let mut questions = Vec::new();
        let mut skipped = 0usize;
        for row in &rows {
            let Some(q) = normalize_row(row, questions.len() + 1) else {
                skipped += 1;
                continue;
            };
            if !seen.insert((q.dimension.clone(), q.agree_pole, q.text.clone())) {
                skipped += 1;
                continue;
            }
            questions.push(q);
        }

        debug!(rows = rows.len(), kept = questions.len(), skipped, "Parsed question bank");
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Questions eligible for new quizzes.
    pub fn active(&self) -> Vec<Question> {
        self.questions.iter().filter(|q| q.is_active).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn normalize_row(row: &Value, ordinal: usize) -> Option<Question> {
    let obj = row.as_object()?;
    let text_field = |key: &str, default: &str| {
        obj.get(key).map_or_else(|| default.to_string(), coerce_text)
    };

    let dimension = text_field("dimension", "").trim().to_uppercase();
    let agree_pole = text_field("agree_pole", "").trim().to_uppercase().chars().next()?;
    let text = text_field("text", "").trim().to_string();
    if dimension.is_empty() || text.is_empty() {
        return None;
    }

    Some(Question {
        id: format!("q{ordinal}"),
        dimension,
        agree_pole,
        text,
        is_active: obj.get("is_active").map_or(true, is_truthy),
        source: text_field("source", "ai").chars().take(MAX_SOURCE_CHARS).collect(),
    })
}

/// Text form of a loosely-typed cell: strings as-is, scalars in their literal spelling.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

/// Falsy: null, false, zero, and empty strings/arrays/objects.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
