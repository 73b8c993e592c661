// Rust guideline compliant 2026-10-19

//! ID resolution helpers for Chairbook.

use crate::error::Result;
use chairbook_core::identity::{self, APPOINTMENT_PREFIX, SERVICE_PREFIX};
use chairbook_core::{Actor, Appointment, Error as CoreError, Service};

/// Trims a caller-supplied identifier, rejecting blanks.
///
/// Stored records always carry trimmed IDs, so every lookup and ownership
/// check goes through here first.
///
/// # Errors
///
/// Returns a validation error naming `field` if `value` is blank.
pub fn normalize_id<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")).into());
    }
    Ok(trimmed)
}

/// Returns `actor` with its identifier normalized.
///
/// # Errors
///
/// Returns a validation error if a client or barber ID is blank.
pub fn normalize_actor(actor: &Actor) -> Result<Actor> {
    Ok(match actor {
        Actor::Client(id) => Actor::Client(normalize_id("client_id", id)?.to_string()),
        Actor::Barber(id) => Actor::Barber(normalize_id("barber_id", id)?.to_string()),
        Actor::System => Actor::System,
    })
}

/// Resolves a partial appointment ID to its canonical full ID.
///
/// # Errors
///
/// Returns an error if the partial ID is too short, ambiguous, or not found.
pub fn resolve_appointment_id(partial: &str, appointments: &[Appointment]) -> Result<String> {
    Ok(identity::resolve_partial_id(
        partial,
        APPOINTMENT_PREFIX,
        appointments.iter().map(|a| a.id.as_str()),
    )?)
}

/// Resolves a partial service ID to its canonical full ID.
///
/// # Errors
///
/// Returns an error if the partial ID is too short, ambiguous, or not found.
pub fn resolve_service_id(partial: &str, services: &[Service]) -> Result<String> {
    Ok(identity::resolve_partial_id(
        partial,
        SERVICE_PREFIX,
        services.iter().map(|s| s.id.as_str()),
    )?)
}
