use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    UnsupportedFormat(String),
    ParseError(String),
    ValidationError(String),
    Unauthorized(String),
    HttpError(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// Message without the category prefix, for showing to the user as-is.
    pub fn message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::UnsupportedFormat(msg)
            | AppError::ParseError(msg)
            | AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::HttpError(msg)
            | AppError::ConfigError(msg)
            | AppError::IoError(msg) => msg,
        }
    }

    /// Errors caused by what the user uploaded or entered.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFormat(_)
                | AppError::ParseError(_)
                | AppError::ValidationError(_)
                | AppError::Unauthorized(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = AppError::ParseError("CSV parsing error: bad row".to_string());
        assert_eq!(err.to_string(), "Parse error: CSV parsing error: bad row");
        assert_eq!(err.message(), "CSV parsing error: bad row");
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(AppError::UnsupportedFormat("x".into()).is_user_facing());
        assert!(AppError::ParseError("x".into()).is_user_facing());
        assert!(!AppError::HttpError("x".into()).is_user_facing());
        assert!(!AppError::Internal("x".into()).is_user_facing());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::IoError(msg) if msg.contains("missing.csv")));
    }
}
