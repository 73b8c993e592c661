// Rust guideline compliant 2026-10-19

//! Parsers for caller-supplied values.

use crate::error::{AppError, Result};
use chairbook_core::{Actor, Status};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a status string into a `Status` value.
///
/// # Errors
///
/// Returns an error if the status is invalid.
pub fn parse_status(value: &str) -> Result<Status> {
    match value.to_lowercase().as_str() {
        "pending" => Ok(Status::Pending),
        "confirmed" => Ok(Status::Confirmed),
        "cancelled" | "canceled" => Ok(Status::Cancelled),
        "completed" => Ok(Status::Completed),
        "no_show" | "no-show" => Ok(Status::NoShow),
        _ => Err(AppError::InvalidInput(format!(
            "Invalid status: {}",
            value
        ))),
    }
}

/// Parses a weekday name such as `mon` or `Monday`.
///
/// # Errors
///
/// Returns an error if the name is not a weekday.
pub fn parse_weekday(value: &str) -> Result<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid weekday: {}", value)))
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the date is malformed.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::InvalidInput(format!("Invalid date '{}': {}", value, e)))
}

/// Parses an `HH:MM` wall-clock time.
///
/// # Errors
///
/// Returns an error if the time is malformed.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| AppError::InvalidInput(format!("Invalid time '{}': {}", value, e)))
}

/// Parses a shop-local `YYYY-MM-DDTHH:MM` timestamp.
///
/// A space may replace the `T` and seconds are optional.
///
/// # Errors
///
/// Returns an error if no accepted format matches.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Invalid date-time '{}': expected YYYY-MM-DDTHH:MM",
                value
            ))
        })
}

/// Parses an actor as `client:<id>`, `barber:<id>`, or `system`.
///
/// # Errors
///
/// Returns an error if the role is unknown or the ID is empty.
pub fn parse_actor(value: &str) -> Result<Actor> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("system") {
        return Ok(Actor::System);
    }

    let invalid = || {
        AppError::InvalidInput(format!(
            "Invalid actor '{}': expected client:<id>, barber:<id>, or system",
            value
        ))
    };
    let (role, id) = trimmed.split_once(':').ok_or_else(invalid)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid());
    }

    match role.trim().to_lowercase().as_str() {
        "client" => Ok(Actor::Client(id.to_string())),
        "barber" => Ok(Actor::Barber(id.to_string())),
        _ => Err(invalid()),
    }
}
