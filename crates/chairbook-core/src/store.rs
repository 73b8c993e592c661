// Rust guideline compliant 2026-10-19

//! Data-store traits consumed by the booking operations.
//!
//! The availability traits live in [`crate::availability`]; this module
//! adds the write side. Implementations must make
//! [`AppointmentStore::update_appointment_status`] atomic: the status check,
//! the overlap check for confirmation, and the write happen as one step, so
//! two racing confirmations for overlapping intervals cannot both succeed.

use crate::models::{Actor, Appointment, BookedInterval, Service, Status, WorkingHoursConfig};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Outcome of a conditional status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The transition was written; carries the updated record.
    Applied(Appointment),
    /// Confirmation refused: another confirmed appointment of the same
    /// barber overlaps. Nothing was written.
    Conflict {
        /// The confirmed appointment occupying the interval.
        conflicting_id: String,
    },
    /// The stored status no longer matches the expected one. Nothing was
    /// written.
    StaleStatus {
        /// Status found in the store.
        actual: Status,
    },
}

/// Filter for listing appointments. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Only appointments of this barber.
    pub barber_id: Option<String>,
    /// Only appointments of this client.
    pub client_id: Option<String>,
    /// Only appointments in this status.
    pub status: Option<Status>,
    /// Only appointments scheduled on this date.
    pub date: Option<NaiveDate>,
}

impl AppointmentFilter {
    /// Returns true if the appointment passes every set criterion.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.barber_id
            .as_ref()
            .map_or(true, |id| *id == appointment.barber_id)
            && self
                .client_id
                .as_ref()
                .map_or(true, |id| *id == appointment.client_id)
            && self.status.map_or(true, |status| status == appointment.status)
            && self.date.map_or(true, |date| date == appointment.date())
    }
}

/// Appointment persistence.
pub trait AppointmentStore {
    /// Inserts a new appointment.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the ID is taken, or a store error.
    fn insert_appointment(&self, appointment: &Appointment) -> Result<()>;

    /// Loads one appointment by full ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such appointment exists, or a store error.
    fn get_appointment(&self, id: &str) -> Result<Appointment>;

    /// Lists appointments matching `filter`, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>>;

    /// Atomically moves appointment `id` from `expected` to `to`.
    ///
    /// When `to` is [`Status::Confirmed`] the store also verifies, inside the
    /// same atomic step, that no other confirmed appointment of the barber
    /// overlaps.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidTransition` if `expected → to` is not a
    /// legal edge, or a store error.
    fn update_appointment_status(
        &self,
        id: &str,
        expected: Status,
        to: Status,
        actor: &Actor,
        at: NaiveDateTime,
    ) -> Result<StatusUpdate>;
}

/// Working-hours and service catalog persistence.
pub trait ScheduleStore {
    /// Inserts or replaces the row for `(barber_id, weekday)`.
    ///
    /// # Errors
    ///
    /// Returns a validation or store error.
    fn upsert_working_hours(&self, config: &WorkingHoursConfig) -> Result<()>;

    /// Lists every working-hours row of a barber, Monday first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_working_hours(&self, barber_id: &str) -> Result<Vec<WorkingHoursConfig>>;

    /// Inserts a new service.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if the ID is taken, or a validation or store
    /// error.
    fn insert_service(&self, service: &Service) -> Result<()>;

    /// Inserts or replaces a service by ID.
    ///
    /// # Errors
    ///
    /// Returns a validation or store error.
    fn upsert_service(&self, service: &Service) -> Result<()>;

    /// Loads one service by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such service exists, or a store error.
    fn get_service(&self, id: &str) -> Result<Service>;

    /// Lists all services ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_services(&self) -> Result<Vec<Service>>;
}

/// Applies a conditional status update to an in-memory record set.
///
/// Shared by the store implementations; callers hold their exclusive lock
/// for the duration and persist `records` only on [`StatusUpdate::Applied`].
pub(crate) fn apply_status_update(
    records: &mut [Appointment],
    id: &str,
    expected: Status,
    to: Status,
    actor: &Actor,
    at: NaiveDateTime,
) -> Result<StatusUpdate> {
    expected.can_transition_to(to)?;

    let Some(pos) = records.iter().position(|a| a.id == id) else {
        return Err(Error::NotFound(id.to_string()));
    };

    if records[pos].status != expected {
        return Ok(StatusUpdate::StaleStatus {
            actual: records[pos].status,
        });
    }

    if to == Status::Confirmed {
        if let Some(conflicting_id) = find_confirmed_overlap(records, &records[pos]) {
            return Ok(StatusUpdate::Conflict { conflicting_id });
        }
    }

    let record = &mut records[pos];
    record.record_transition(to, actor.clone(), at);
    Ok(StatusUpdate::Applied(record.clone()))
}

/// Returns the ID of a confirmed appointment of the same barber whose
/// interval overlaps `candidate`.
fn find_confirmed_overlap(records: &[Appointment], candidate: &Appointment) -> Option<String> {
    let wanted = candidate.interval()?;
    records
        .iter()
        .filter(|other| {
            other.id != candidate.id
                && other.barber_id == candidate.barber_id
                && other.status == Status::Confirmed
        })
        .find(|other| other.interval().is_some_and(|taken| taken.overlaps(&wanted)))
        .map(|other| other.id.clone())
}

/// Collects confirmed bookings of a barber on a date.
pub(crate) fn confirmed_on(records: &[Appointment], barber_id: &str, date: NaiveDate) -> Vec<BookedInterval> {
    records
        .iter()
        .filter(|a| a.barber_id == barber_id && a.status == Status::Confirmed && a.date() == date)
        .map(BookedInterval::from)
        .collect()
}

/// Sorts appointments by start time, then ID.
pub(crate) fn sort_appointments(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then_with(|| a.id.cmp(&b.id)));
}
