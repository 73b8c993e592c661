// Rust guideline compliant 2026-10-19

//! JSON envelopes written by `chb --json`.
//!
//! Successful commands print `{"status": "ok", "kind": ..., "result": ...}`
//! on stdout; failures print an [`ErrorEnvelope`] on stderr so scripts can
//! branch on `code` and, for conflicts, on the IDs in `details`.

use crate::error::{AppError, ErrorCode};
use serde::Serialize;

/// What a success payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// One appointment with its history.
    Appointment,
    /// A filtered appointment listing.
    Appointments,
    /// Bookable slots of a barber on a date.
    Slots,
    /// One catalog service.
    Service,
    /// The service catalog.
    Services,
    /// A barber's weekly working hours.
    WorkingHours,
    /// A plain confirmation message.
    Message,
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Shape of `result`.
    pub kind: PayloadKind,
    /// Result payload.
    pub result: T,
}

impl<T> SuccessEnvelope<T> {
    /// Wraps a payload of the given kind.
    #[must_use]
    pub fn new(kind: PayloadKind, result: T) -> Self {
        Self {
            status: "ok",
            kind,
            result,
        }
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// What the caller can do next, for errors with an obvious follow-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    /// Structured details, e.g. both IDs of a confirmation conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Builds the envelope for an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        let code = error.code();
        Self {
            code,
            message: error.to_string(),
            hint: hint(code),
            details: error.details(),
        }
    }
}

fn hint(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::Conflict => Some("reject the request or ask the client for another slot"),
        ErrorCode::NotInitialized => Some("run `chb init` first"),
        ErrorCode::AmbiguousId => Some("use more characters of the ID"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chairbook_core::Error as CoreError;

    #[test]
    fn test_success_envelope_shape() {
        let value = serde_json::to_value(SuccessEnvelope::new(PayloadKind::WorkingHours, 3)).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["kind"], "working_hours");
        assert_eq!(value["result"], 3);
    }

    #[test]
    fn test_conflict_envelope_carries_hint_and_ids() {
        let error = AppError::Core(CoreError::Conflict {
            appointment_id: "apt-222222".to_string(),
            conflicting_id: "apt-111111".to_string(),
        });
        let value = serde_json::to_value(ErrorEnvelope::from_error(&error)).unwrap();
        assert_eq!(value["code"], "conflict");
        assert!(value["hint"].as_str().unwrap().contains("reject"));
        assert_eq!(value["details"]["conflicting_id"], "apt-111111");
    }

    #[test]
    fn test_validation_envelope_has_no_hint() {
        let error = AppError::Core(CoreError::Validation("bad".to_string()));
        let value = serde_json::to_value(ErrorEnvelope::from_error(&error)).unwrap();
        assert_eq!(value["code"], "validation_error");
        assert!(value.get("hint").is_none());
        assert!(value.get("details").is_none());
    }
}
