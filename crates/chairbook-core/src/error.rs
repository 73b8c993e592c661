// Rust guideline compliant 2026-10-19

//! Error types for the Chairbook core library.

use thiserror::Error;

/// Result type alias for Chairbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Chairbook operations.
///
/// A missing working-hours row is not represented here: it is a valid
/// "day off" and surfaces as an empty slot list.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input, rejected before any state mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same ID already exists.
    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    /// Ambiguous partial ID.
    #[error("Ambiguous ID: {0} matches {1:?}")]
    AmbiguousId(String, Vec<String>),

    /// Transition from a terminal state or by a disallowed actor.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Confirmation refused because the interval is already occupied.
    #[error("Conflict: appointment {appointment_id} overlaps confirmed appointment {conflicting_id}")]
    Conflict {
        /// Appointment whose confirmation was refused.
        appointment_id: String,
        /// Already-confirmed appointment occupying the interval.
        conflicting_id: String,
    },

    /// Failure reported by the backing data source.
    #[error("Data source error: {0}")]
    DataSource(String),
}
