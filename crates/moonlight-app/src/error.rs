//! # App Error Type
//!
//! Unified error type for every workflow operation.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┼──► AppError { code, message } ──► caller           │
//! │  DbError ──────────┘                                                    │
//! │                                                                         │
//! │  Every error is caught at the operation boundary and surfaced with      │
//! │  the underlying cause text VERBATIM in `message`. Nothing is retried    │
//! │  automatically, and nothing is swallowed except the best-effort image   │
//! │  upload (which degrades to "no image").                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use moonlight_core::CoreError;
use moonlight_db::DbError;

/// Error returned from every workflow operation.
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message, carrying the cause text verbatim
    pub message: String,
}

/// Error codes, one per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Bad or missing input, caught before any write
    Validation,

    /// Requested quantity exceeds known availability
    InsufficientStock,

    /// The data service rejected a read or write
    Persistence,

    /// Delete blocked by existing references
    ReferentialConstraint,

    /// Anything else (I/O, serialization)
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Validation, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors, keeping their message text.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::EmptyCart => ErrorCode::Validation,
            CoreError::PaymentExceedsBalance { .. } => ErrorCode::Validation,
            CoreError::Validation(_) => ErrorCode::Validation,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts validation errors directly (skipping the CoreError wrapper's
/// "Validation error:" prefix).
impl From<moonlight_core::ValidationError> for AppError {
    fn from(err: moonlight_core::ValidationError) -> Self {
        AppError::new(ErrorCode::Validation, err.to_string())
    }
}

/// Converts database errors, keeping their message text.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        let code = match &err {
            DbError::NotFound { .. } => ErrorCode::NotFound,
            DbError::UniqueViolation { .. } => ErrorCode::Validation,
            DbError::ForeignKeyViolation { .. } => ErrorCode::ReferentialConstraint,
            _ => ErrorCode::Persistence,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for workflow operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: AppError = CoreError::InsufficientStock {
            name: "Amber Oud".to_string(),
            available: 3,
            requested: 5,
        }
        .into();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        // Cause text is preserved verbatim.
        assert_eq!(
            err.message,
            "Insufficient stock for Amber Oud: available 3, requested 5"
        );
    }

    #[test]
    fn test_db_error_mapping() {
        let err: AppError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ReferentialConstraint);

        let err: AppError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::Persistence);
        assert!(err.message.contains("disk I/O error"));
    }
}
