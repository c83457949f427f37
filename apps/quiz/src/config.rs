use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::bank::QuestionBank;
use crate::quiz::scoring::DEFAULT_BOUNDARY_GAP_PERCENT;
use crate::report::TypeReportTable;
use crate::security::admin_session::DEFAULT_ADMIN_SESSION_MAX_AGE_SECS;
use crate::security::AdminCredentials;

pub const DEV_APP_SECRET: &str = "dev-secret-change-me";

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Keys token digests and admin session signatures.
    pub app_secret: String,
    /// `None` unless both username and password are set.
    pub admin: Option<AdminCredentials>,
    pub admin_session_max_age_secs: i64,
    pub boundary_gap_percent: u8,
    /// Overrides the built-in type report table.
    pub type_reports_path: Option<PathBuf>,
    /// Overrides the built-in seed question bank.
    pub seed_questions_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (env, map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_secret =
            non_empty(lookup("MBTI_APP_SECRET")).unwrap_or_else(|| DEV_APP_SECRET.to_string());

        let admin = match (
            non_empty(lookup("MBTI_ADMIN_USERNAME")),
            non_empty(lookup("MBTI_ADMIN_PASSWORD")),
        ) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            _ => None,
        };

        Ok(Config {
            app_secret,
            admin,
            admin_session_max_age_secs: parse_or(
                &lookup,
                "MBTI_ADMIN_SESSION_MAX_AGE_SECONDS",
                DEFAULT_ADMIN_SESSION_MAX_AGE_SECS,
            )?,
            boundary_gap_percent: parse_or(
                &lookup,
                "MBTI_BOUNDARY_GAP_PERCENT",
                DEFAULT_BOUNDARY_GAP_PERCENT,
            )?,
            type_reports_path: non_empty(lookup("MBTI_TYPE_REPORTS_PATH")).map(PathBuf::from),
            seed_questions_path: non_empty(lookup("MBTI_SEED_QUESTIONS_PATH")).map(PathBuf::from),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn is_admin_configured(&self) -> bool {
        self.admin.is_some()
    }

    /// Config is read before logging is up, so the caller warns on this.
    pub fn uses_dev_secret(&self) -> bool {
        self.app_secret == DEV_APP_SECRET
    }

    /// `override_path` wins over `MBTI_SEED_QUESTIONS_PATH`; neither means the built-in bank.
    pub fn load_question_bank(&self, override_path: Option<&Path>) -> Result<QuestionBank> {
        match override_path.or(self.seed_questions_path.as_deref()) {
            Some(path) => QuestionBank::from_path(path)
                .with_context(|| format!("Failed to load questions from {}", path.display())),
            None => QuestionBank::builtin().context("Built-in question bank is malformed"),
        }
    }

    /// `override_path` wins over `MBTI_TYPE_REPORTS_PATH`; neither means the built-in table.
    pub fn load_report_table(&self, override_path: Option<&Path>) -> Result<TypeReportTable> {
        match override_path.or(self.type_reports_path.as_deref()) {
            Some(path) => TypeReportTable::from_path(path)
                .with_context(|| format!("Failed to load type reports from {}", path.display())),
            None => TypeReportTable::builtin().context("Built-in type report table is malformed"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert!(config.uses_dev_secret());
        assert!(config.admin.is_none());
        assert_eq!(config.admin_session_max_age_secs, 1_209_600);
        assert_eq!(config.boundary_gap_percent, 10);
        assert!(config.type_reports_path.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_admin_requires_both_fields() {
        let only_user = config_from(&[("MBTI_ADMIN_USERNAME", "admin")]).unwrap();
        assert!(!only_user.is_admin_configured());

        let both = config_from(&[
            ("MBTI_ADMIN_USERNAME", "admin"),
            ("MBTI_ADMIN_PASSWORD", "pass"),
        ])
        .unwrap();
        assert!(both.admin.unwrap().matches("admin", "pass"));
    }

    #[test]
    fn test_overrides_parsed() {
        let config = config_from(&[
            ("MBTI_APP_SECRET", "s3cret"),
            ("MBTI_BOUNDARY_GAP_PERCENT", "6"),
            ("MBTI_ADMIN_SESSION_MAX_AGE_SECONDS", "3600"),
            ("MBTI_TYPE_REPORTS_PATH", "/tmp/reports.json"),
        ])
        .unwrap();
        assert_eq!(config.app_secret, "s3cret");
        assert!(!config.uses_dev_secret());
        assert_eq!(config.boundary_gap_percent, 6);
        assert_eq!(config.admin_session_max_age_secs, 3600);
        assert_eq!(
            config.type_reports_path,
            Some(PathBuf::from("/tmp/reports.json"))
        );
    }

    #[test]
    fn test_builtin_data_used_without_paths() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.load_question_bank(None).unwrap().len(), 64);
        assert_eq!(config.load_report_table(None).unwrap().len(), 16);
    }

    #[test]
    fn test_override_path_beats_env_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"dimension": "TF", "agree_pole": "F", "text": "Harmony first"}}]"#)
            .unwrap();
        let config = config_from(&[("MBTI_SEED_QUESTIONS_PATH", "/nonexistent/seed.json")]).unwrap();

        assert!(config.load_question_bank(None).is_err());
        let bank = config.load_question_bank(Some(file.path())).unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = config_from(&[("MBTI_BOUNDARY_GAP_PERCENT", "ten")]).unwrap_err();
        assert!(err.to_string().contains("MBTI_BOUNDARY_GAP_PERCENT"));
    }
}
