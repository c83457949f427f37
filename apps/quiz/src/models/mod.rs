pub mod answer;
pub mod question;
pub mod result;

pub use answer::{Answers, LIKERT_MAX, LIKERT_MIN, LIKERT_NEUTRAL};
pub use question::{Dimension, Question};
pub use result::{DimensionResult, ScoreSummary, TypeCode};
