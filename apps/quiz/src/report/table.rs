//! Static per-type narrative content, keyed by four-letter type code.
//!
//! Constructed once (built-in JSON, a file, or a string) and then only read.
//! Owned by `ReportBuilder`; swap in an alternate table for tests or locales.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::QuizError;
use crate::models::TypeCode;

const BUILTIN_TYPE_REPORTS: &str = include_str!("../../data/type_reports.json");

/// Narrative for one type code. Every field is optional in the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReport {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub blind_spots: Vec<String>,
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub suitable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeReportTable {
    entries: HashMap<String, TypeReport>,
}

impl TypeReportTable {
    pub fn new(entries: HashMap<String, TypeReport>) -> Self {
        Self { entries }
    }

    /// The table shipped with the crate (`data/type_reports.json`).
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_json_str(BUILTIN_TYPE_REPORTS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let entries: HashMap<String, TypeReport> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&raw)?;
        info!(path = %path.display(), entries = table.len(), "Loaded type report table");
        Ok(table)
    }

    pub fn get(&self, type_code: &str) -> Option<&TypeReport> {
        self.entries.get(type_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Type codes with no entry, in canonical order.
    pub fn missing_type_codes(&self) -> Vec<TypeCode> {
        TypeCode::all()
            .into_iter()
            .filter(|code| !self.entries.contains_key(code.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table_covers_all_types() {
        let table = TypeReportTable::builtin().unwrap();
        assert!(table.missing_type_codes().is_empty());
        let intj = table.get("INTJ").unwrap();
        assert!(intj.title.is_some());
        assert!(!intj.strengths.is_empty());
        assert!(!intj.blind_spots.is_empty());
        assert!(!intj.advice.is_empty());
        assert!(!intj.suitable.is_empty());
    }

    #[test]
    fn test_partial_entries_default_missing_fields() {
        let table = TypeReportTable::from_json_str(r#"{"ENFP": {"title": "Campaigner"}}"#).unwrap();
        let entry = table.get("ENFP").unwrap();
        assert_eq!(entry.title.as_deref(), Some("Campaigner"));
        assert!(entry.summary.is_none());
        assert!(entry.strengths.is_empty());
        assert_eq!(table.missing_type_codes().len(), 15);
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ISTP": {{"summary": "Hands-on."}}}}"#).unwrap();
        let table = TypeReportTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ISTP").unwrap().summary.as_deref(), Some("Hands-on."));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = TypeReportTable::from_path("/nonexistent/type_reports.json").unwrap_err();
        assert!(matches!(err, QuizError::Io(_)));
    }
}
