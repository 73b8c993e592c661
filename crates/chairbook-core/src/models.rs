// Rust guideline compliant 2026-10-19

//! Core data models for Chairbook.

use crate::interval::Interval;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an appointment in the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Requested by a client, awaiting the barber.
    Pending,
    /// Accepted by the barber; occupies its interval.
    Confirmed,
    /// Rejected by the barber or cancelled by either party.
    Cancelled,
    /// Service was delivered.
    Completed,
    /// Client did not show up.
    NoShow,
}

impl Status {
    /// All statuses, in lifecycle order.
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::Confirmed,
        Status::Cancelled,
        Status::Completed,
        Status::NoShow,
    ];

    /// Returns the canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Confirmed => "confirmed",
            Status::Cancelled => "cancelled",
            Status::Completed => "completed",
            Status::NoShow => "no_show",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Actor {
    /// A client acting on their own appointments.
    Client(String),
    /// A barber acting on appointments assigned to them.
    Barber(String),
    /// A scheduled process (e.g. the end-of-day completion job).
    System,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Client(id) => write!(f, "client:{id}"),
            Actor::Barber(id) => write!(f, "barber:{id}"),
            Actor::System => f.write_str("system"),
        }
    }
}

/// Weekly working hours of a barber for one weekday.
///
/// Stored as one row per `(barber_id, weekday)`, upserted on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursConfig {
    /// Owning barber.
    pub barber_id: String,
    /// Weekday this row applies to.
    pub weekday: Weekday,
    /// Start of the working day.
    pub start_time: NaiveTime,
    /// End of the working day (exclusive).
    pub end_time: NaiveTime,
    /// Start of the lunch break.
    #[serde(default)]
    pub lunch_start: Option<NaiveTime>,
    /// End of the lunch break (exclusive).
    #[serde(default)]
    pub lunch_end: Option<NaiveTime>,
    /// Whether the barber works on this weekday.
    pub active: bool,
}

impl WorkingHoursConfig {
    /// Validates the row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The barber ID is empty
    /// - Only one of the lunch bounds is set
    /// - The row is active and `start_time >= end_time`
    /// - The row is active and the lunch window is empty or not contained
    ///   within the working window
    pub fn validate(&self) -> Result<()> {
        if self.barber_id.trim().is_empty() {
            return Err(Error::Validation(
                "Working hours barber ID cannot be empty".to_string(),
            ));
        }

        if self.lunch_start.is_some() != self.lunch_end.is_some() {
            return Err(Error::Validation(
                "Lunch start and end must be set together".to_string(),
            ));
        }

        if !self.active {
            return Ok(());
        }

        if self.start_time >= self.end_time {
            return Err(Error::Validation(format!(
                "Start time {} must be before end time {}",
                self.start_time, self.end_time
            )));
        }

        if let (Some(lunch_start), Some(lunch_end)) = (self.lunch_start, self.lunch_end) {
            if lunch_start >= lunch_end {
                return Err(Error::Validation(format!(
                    "Lunch start {} must be before lunch end {}",
                    lunch_start, lunch_end
                )));
            }
            if lunch_start < self.start_time || lunch_end > self.end_time {
                return Err(Error::Validation(format!(
                    "Lunch {}-{} must lie within working hours {}-{}",
                    lunch_start, lunch_end, self.start_time, self.end_time
                )));
            }
        }

        Ok(())
    }

    /// The working window `[start_time, end_time)` on `date`.
    pub fn working_window(&self, date: NaiveDate) -> Option<Interval> {
        Interval::new(date.and_time(self.start_time), date.and_time(self.end_time))
    }

    /// The lunch window `[lunch_start, lunch_end)` on `date`, if any.
    pub fn lunch_window(&self, date: NaiveDate) -> Option<Interval> {
        match (self.lunch_start, self.lunch_end) {
            (Some(start), Some(end)) => Interval::new(date.and_time(start), date.and_time(end)),
            _ => None,
        }
    }

    /// Bookable windows on `date`: the working window minus lunch.
    ///
    /// Empty when the row is inactive.
    pub fn open_windows(&self, date: NaiveDate) -> Vec<Interval> {
        if !self.active {
            return Vec::new();
        }
        let Some(window) = self.working_window(date) else {
            return Vec::new();
        };
        match self.lunch_window(date) {
            Some(lunch) => window.subtract(&lunch),
            None => vec![window],
        }
    }
}

/// A bookable service offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique hash-based identifier (format: svc-XXXXXX).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in cents.
    pub price_cents: u64,
    /// Length of the service in minutes.
    pub duration_minutes: u32,
    /// Whether the service can be booked.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Service {
    /// Creates a new active service with a generated ID.
    ///
    /// `nonce` is bumped by the caller when the ID is already taken.
    pub fn new(name: String, price_cents: u64, duration_minutes: u32, now: NaiveDateTime, nonce: u32) -> Self {
        let id = crate::identity::generate_id(
            crate::identity::SERVICE_PREFIX,
            &[name.as_str(), &price_cents.to_string(), &duration_minutes.to_string()],
            now,
            nonce,
        );
        Self {
            id,
            name,
            price_cents,
            duration_minutes,
            active: true,
        }
    }

    /// Validates the service data.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the duration is zero, or the
    /// ID format is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Service name cannot be empty".to_string()));
        }
        if self.duration_minutes == 0 {
            return Err(Error::Validation(
                "Service duration must be greater than 0".to_string(),
            ));
        }
        crate::identity::validate_id_format(&self.id, crate::identity::SERVICE_PREFIX)
    }
}

/// One entry of an appointment's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Status before the transition.
    pub from: Status,
    /// Status after the transition.
    pub to: Status,
    /// Who performed the transition.
    pub actor: Actor,
    /// Shop-local time of the transition.
    pub at: NaiveDateTime,
}

/// Fields supplied by a client when requesting an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    /// Requesting client.
    pub client_id: String,
    /// Requested barber.
    pub barber_id: String,
    /// Requested service.
    pub service_id: String,
    /// Requested start, shop-local wall-clock time.
    pub scheduled_at: NaiveDateTime,
}

impl NewAppointment {
    /// Checks that every required field is present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("barber_id", &self.barber_id),
            ("service_id", &self.service_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

/// An appointment between a client and a barber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique hash-based identifier (format: apt-XXXXXX).
    pub id: String,
    /// Requesting client.
    pub client_id: String,
    /// Assigned barber.
    pub barber_id: String,
    /// Booked service.
    pub service_id: String,
    /// Start, shop-local wall-clock time.
    pub scheduled_at: NaiveDateTime,
    /// Service length captured at request time.
    pub duration_minutes: u32,
    /// Current lifecycle status.
    pub status: Status,
    /// Shop-local creation time.
    pub created_at: NaiveDateTime,
    /// Shop-local time of the last status change.
    pub updated_at: NaiveDateTime,
    /// Append-only status history.
    #[serde(default)]
    pub history: Vec<StatusChange>,
}

impl Appointment {
    /// Creates a pending appointment from a request.
    ///
    /// `nonce` disambiguates IDs of otherwise identical requests.
    pub fn new(request: NewAppointment, duration_minutes: u32, now: NaiveDateTime, nonce: u32) -> Self {
        let scheduled = request.scheduled_at.to_string();
        let id = crate::identity::generate_id(
            crate::identity::APPOINTMENT_PREFIX,
            &[
                request.client_id.as_str(),
                request.barber_id.as_str(),
                request.service_id.as_str(),
                scheduled.as_str(),
            ],
            now,
            nonce,
        );

        Self {
            id,
            client_id: request.client_id,
            barber_id: request.barber_id,
            service_id: request.service_id,
            scheduled_at: request.scheduled_at,
            duration_minutes,
            status: Status::Pending,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// The occupied interval `[scheduled_at, scheduled_at + duration)`.
    pub fn interval(&self) -> Option<Interval> {
        Interval::from_duration(self.scheduled_at, self.duration_minutes)
    }

    /// Calendar date of the appointment.
    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }

    /// Applies a status change and records it in the history.
    ///
    /// Callers are responsible for validating the transition first.
    pub fn record_transition(&mut self, to: Status, actor: Actor, at: NaiveDateTime) {
        self.history.push(StatusChange {
            from: self.status,
            to,
            actor,
            at,
        });
        self.status = to;
        self.updated_at = at;
    }

    /// Validates the appointment data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A participant or service ID is empty
    /// - The duration is zero
    /// - The ID format is invalid
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.barber_id.trim().is_empty() {
            return Err(Error::Validation(
                "Appointment participants cannot be empty".to_string(),
            ));
        }
        if self.service_id.trim().is_empty() {
            return Err(Error::Validation(
                "Appointment service cannot be empty".to_string(),
            ));
        }
        if self.duration_minutes == 0 {
            return Err(Error::Validation(
                "Appointment duration must be greater than 0".to_string(),
            ));
        }
        crate::identity::validate_id_format(&self.id, crate::identity::APPOINTMENT_PREFIX)
    }
}

/// A candidate start time, derived per availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time of the slot.
    pub start: NaiveTime,
    /// Length of the slot in minutes.
    pub duration_minutes: u32,
}

impl TimeSlot {
    /// The slot as an interval on `date`.
    pub fn interval_on(&self, date: NaiveDate) -> Option<Interval> {
        Interval::from_duration(date.and_time(self.start), self.duration_minutes)
    }
}

/// An occupied interval taken from a confirmed appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    /// Source appointment.
    pub appointment_id: String,
    /// Start of the booking.
    pub scheduled_at: NaiveDateTime,
    /// Length of the booking in minutes.
    pub duration_minutes: u32,
}

impl BookedInterval {
    /// The occupied interval.
    pub fn interval(&self) -> Option<Interval> {
        Interval::from_duration(self.scheduled_at, self.duration_minutes)
    }
}

impl From<&Appointment> for BookedInterval {
    fn from(appointment: &Appointment) -> Self {
        Self {
            appointment_id: appointment.id.clone(),
            scheduled_at: appointment.scheduled_at,
            duration_minutes: appointment.duration_minutes,
        }
    }
}
