// Rust guideline compliant 2026-10-19

//! Finite State Machine module for appointment status transitions.
//!
//! The FSM enforces the following transitions:
//!
//! - Pending → Confirmed (owning barber)
//! - Pending → Cancelled (owning barber or owning client)
//! - Confirmed → Cancelled (owning barber or owning client)
//! - Confirmed → Completed / NoShow (owning barber or system, once the
//!   scheduled time has passed)
//!
//! Cancelled, Completed, and NoShow are terminal.

use crate::models::{Actor, Appointment, Status};
use crate::{Error, Result};
use chrono::NaiveDateTime;

impl Status {
    /// Returns true for statuses with no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Cancelled | Status::Completed | Status::NoShow)
    }

    /// Checks if a transition to the target status is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not in the valid transition set.
    pub fn can_transition_to(&self, target: Status) -> Result<()> {
        if self.is_terminal() {
            return Err(Error::InvalidTransition(format!(
                "Cannot transition from terminal status {} to {}",
                self, target
            )));
        }

        if self.valid_transitions().contains(&target) {
            return Ok(());
        }

        Err(Error::InvalidTransition(format!(
            "Cannot transition from {} to {}",
            self, target
        )))
    }

    /// Returns the list of valid target states for the current status.
    pub fn valid_transitions(&self) -> Vec<Status> {
        match self {
            Status::Pending => vec![Status::Confirmed, Status::Cancelled],
            Status::Confirmed => vec![Status::Completed, Status::Cancelled, Status::NoShow],
            Status::Cancelled | Status::Completed | Status::NoShow => Vec::new(),
        }
    }
}

/// Validates that `actor` may move `appointment` to `target` at `now`.
///
/// Only the status/actor rules are checked here. The overlap check for
/// confirmation needs the store and is performed atomically by it.
///
/// # Errors
///
/// Returns `InvalidTransition` if:
/// - The status transition is not allowed
/// - The actor is not permitted to perform it
/// - Completion or no-show is attempted before the scheduled time
pub fn authorize(appointment: &Appointment, target: Status, actor: &Actor, now: NaiveDateTime) -> Result<()> {
    appointment.status.can_transition_to(target)?;

    let owns_as_barber = matches!(actor, Actor::Barber(id) if *id == appointment.barber_id);
    let owns_as_client = matches!(actor, Actor::Client(id) if *id == appointment.client_id);

    let permitted = match target {
        Status::Confirmed => owns_as_barber,
        Status::Cancelled => owns_as_barber || owns_as_client,
        Status::Completed | Status::NoShow => owns_as_barber || *actor == Actor::System,
        Status::Pending => false,
    };

    if !permitted {
        return Err(Error::InvalidTransition(format!(
            "{} may not move appointment {} from {} to {}",
            actor, appointment.id, appointment.status, target
        )));
    }

    if matches!(target, Status::Completed | Status::NoShow) && appointment.scheduled_at > now {
        return Err(Error::InvalidTransition(format!(
            "Appointment {} is scheduled for {} and cannot be marked {} yet",
            appointment.id, appointment.scheduled_at, target
        )));
    }

    Ok(())
}
