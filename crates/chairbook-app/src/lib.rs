// Rust guideline compliant 2026-10-19

//! Application services for Chairbook.
//!
//! This crate provides the booking operations used by callers: slot lookup,
//! appointment requests, barber confirmation with conflict detection, and
//! the remaining lifecycle transitions. It also carries data-directory
//! discovery, input parsers, and standardized response envelopes.

pub mod clock;
pub mod error;
pub mod ids;
pub mod parse;
pub mod repo;
pub mod response;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{AppError, ErrorCode, Result};
pub use ids::{normalize_actor, normalize_id, resolve_appointment_id, resolve_service_id};
pub use parse::{parse_actor, parse_date, parse_datetime, parse_status, parse_time, parse_weekday};
pub use repo::DataDir;
pub use response::{ErrorEnvelope, PayloadKind, SuccessEnvelope};
pub use service::{BookingService, BookingStore, ConfirmOutcome};
