pub mod bank;
pub mod config;
pub mod errors;
pub mod models;
pub mod quiz;
pub mod report;
pub mod security;

pub use bank::QuestionBank;
pub use config::Config;
pub use errors::QuizError;
pub use models::{Answers, Dimension, DimensionResult, Question, ScoreSummary, TypeCode};
pub use quiz::scoring::{boundary_notes, is_near_boundary, score_all, score_dimension};
pub use quiz::selection::select_balanced;
pub use report::{ReportBuilder, TypeReportTable};
