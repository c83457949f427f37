use thiserror::Error;

/// Library-level error type.
/// Binaries wrap it in `anyhow::Error`; the core functions return `Result<T, QuizError>`.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Caller passed a value outside a fixed allowed set (quiz size, expiry choice, Likert value).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A balanced draw could not be satisfied for one dimension.
    #[error("Not enough questions for {dimension}: need {need}, have {have}")]
    InsufficientPool {
        dimension: String,
        need: usize,
        have: usize,
    },

    /// Structurally valid JSON with the wrong shape (e.g. bank file that is not an array).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            QuizError::InvalidParameter(_) => "INVALID_PARAMETER",
            QuizError::InsufficientPool { .. } => "INSUFFICIENT_POOL",
            QuizError::InvalidData(_) => "INVALID_DATA",
            QuizError::Json(_) => "JSON_ERROR",
            QuizError::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_pool_message_names_dimension() {
        let err = QuizError::InsufficientPool {
            dimension: "SN".to_string(),
            need: 5,
            have: 0,
        };
        assert_eq!(err.to_string(), "Not enough questions for SN: need 5, have 0");
        assert_eq!(err.code(), "INSUFFICIENT_POOL");
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: QuizError = parse.into();
        assert_eq!(err.code(), "JSON_ERROR");
    }
}
