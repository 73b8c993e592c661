// Rust guideline compliant 2026-10-19

//! Error handling for Chairbook application services.

use chairbook_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for caller-facing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The requested record was not found.
    NotFound,
    /// The provided identifier matched multiple records.
    AmbiguousId,
    /// A generated identifier collided with an existing record.
    DuplicateId,
    /// The requested state transition is invalid.
    InvalidTransition,
    /// The requested interval is already taken by a confirmed appointment.
    Conflict,
    /// Input validation failed.
    ValidationError,
    /// The backing data source failed.
    DataSourceError,
    /// IO failure while reading or writing data.
    IoError,
    /// JSON serialization or parsing failed.
    JsonError,
    /// The data directory has not been initialized.
    NotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Data directory is missing or not initialized.
    #[error("Chairbook data directory not initialized at {path}. Run 'chb init' first.")]
    NotInitialized {
        /// Path where the data directory was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotInitialized { .. } => ErrorCode::NotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => match core {
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::AmbiguousId(_, _) => ErrorCode::AmbiguousId,
                CoreError::DuplicateId(_) => ErrorCode::DuplicateId,
                CoreError::InvalidTransition(_) => ErrorCode::InvalidTransition,
                CoreError::Conflict { .. } => ErrorCode::Conflict,
                CoreError::Validation(_) => ErrorCode::ValidationError,
                CoreError::DataSource(_) => ErrorCode::DataSourceError,
                CoreError::Io(_) => ErrorCode::IoError,
                CoreError::Json(_) => ErrorCode::JsonError,
            },
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::NotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::InvalidInput(_) | AppError::Io(_) => None,
            AppError::Core(core) => match core {
                CoreError::AmbiguousId(partial, matches) => Some(serde_json::json!({
                    "partial": partial,
                    "matches": matches,
                })),
                CoreError::Conflict {
                    appointment_id,
                    conflicting_id,
                } => Some(serde_json::json!({
                    "appointment_id": appointment_id,
                    "conflicting_id": conflicting_id,
                })),
                _ => None,
            },
        }
    }
}
