//! Error types and exit codes for gavel
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, rejected rubric)
//! - 3: Data/store error (missing store, unknown ids, duplicate writes)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the gavel CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, unknown ids (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for GavelError {
    fn from(err: rusqlite::Error) -> Self {
        GavelError::Other(err.to_string())
    }
}

/// Errors that can occur during gavel operations
#[derive(Error, Debug)]
pub enum GavelError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("rubric weights must sum to exactly 100, got {total}")]
    WeightSumMismatch { total: f64 },

    #[error("invalid criterion at position {index}: {reason}")]
    InvalidCriterion { index: usize, reason: String },

    #[error("rubric must have between 1 and {max} criteria, got {count}")]
    CriteriaCount { count: usize, max: usize },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("invalid store: {reason}")]
    InvalidStore { reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("assignment {id} cannot move from {from} to {to}")]
    InvalidTransition { id: String, from: String, to: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl GavelError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        GavelError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GavelError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        GavelError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        GavelError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            GavelError::UnknownFormat(_)
            | GavelError::UsageError(_)
            | GavelError::WeightSumMismatch { .. }
            | GavelError::InvalidCriterion { .. }
            | GavelError::CriteriaCount { .. }
            | GavelError::InvalidValue { .. } => ExitCode::Usage,

            // Data/store errors
            GavelError::StoreNotFound { .. }
            | GavelError::InvalidStore { .. }
            | GavelError::NotFound { .. }
            | GavelError::AlreadyExists { .. }
            | GavelError::InvalidTransition { .. } => ExitCode::Data,

            // Generic failures
            GavelError::Io(_)
            | GavelError::Json(_)
            | GavelError::Toml(_)
            | GavelError::FailedOperation { .. }
            | GavelError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GavelError::UnknownFormat(_) => "unknown_format",
            GavelError::UsageError(_) => "usage_error",
            GavelError::WeightSumMismatch { .. } => "weight_sum_mismatch",
            GavelError::InvalidCriterion { .. } => "invalid_criterion",
            GavelError::CriteriaCount { .. } => "criteria_count",
            GavelError::InvalidValue { .. } => "invalid_value",
            GavelError::StoreNotFound { .. } => "store_not_found",
            GavelError::InvalidStore { .. } => "invalid_store",
            GavelError::NotFound { .. } => "not_found",
            GavelError::AlreadyExists { .. } => "already_exists",
            GavelError::InvalidTransition { .. } => "invalid_transition",
            GavelError::Io(_) => "io_error",
            GavelError::Json(_) => "json_error",
            GavelError::Toml(_) => "toml_error",
            GavelError::FailedOperation { .. } => "failed_operation",
            GavelError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for gavel operations
pub type Result<T> = std::result::Result<T, GavelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            GavelError::UnknownFormat("x".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            GavelError::WeightSumMismatch { total: 99.0 }.exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            GavelError::not_found("submission", "sub-1").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            GavelError::already_exists("score", "judge-1/sub-1").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            GavelError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = GavelError::WeightSumMismatch { total: 99.0 };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "weight_sum_mismatch");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("sum to exactly 100"));
    }
}
