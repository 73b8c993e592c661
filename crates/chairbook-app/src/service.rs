// Rust guideline compliant 2026-10-19

//! Booking operations exposed to the calling layer.
//!
//! [`BookingService`] wires the availability engine and the appointment
//! state machine to an injected store and clock. Every status change goes
//! through [`chairbook_core::authorize`] and then through the store's atomic
//! conditional update, so legality checks and the write never diverge.
//!
//! Caller-supplied IDs are trimmed on entry; blank IDs are validation errors.

use crate::clock::Clock;
use crate::error::{AppError, Result};
use crate::ids::{normalize_actor, normalize_id};
use chairbook_core::availability::within_open_hours;
use chairbook_core::{
    authorize, compute_available_slots, Actor, Appointment, AppointmentFilter, AppointmentStore,
    BookingSource, Config, Error as CoreError, NewAppointment, ScheduleStore, Service, Status,
    StatusUpdate, TimeSlot, WorkingHoursConfig, WorkingHoursSource,
};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, error, info, warn};

/// Attempts at generating a fresh appointment or service ID before giving up.
const MAX_ID_ATTEMPTS: u32 = 8;

/// Attempts at re-reading an appointment whose status moved underneath us.
const MAX_STALE_RETRIES: u32 = 3;

/// Every data-source capability the booking operations need.
pub trait BookingStore: WorkingHoursSource + BookingSource + AppointmentStore + ScheduleStore {}

impl<T> BookingStore for T where T: WorkingHoursSource + BookingSource + AppointmentStore + ScheduleStore {}

/// Result of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The appointment is now confirmed.
    Confirmed(Appointment),
    /// Another confirmed appointment occupies the interval; the appointment
    /// stays pending and the barber should reject it instead.
    Conflict {
        /// Appointment that could not be confirmed.
        appointment_id: String,
        /// Confirmed appointment occupying the interval.
        conflicting_id: String,
    },
}

impl ConfirmOutcome {
    /// Converts a conflict into [`CoreError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns the conflict as an error.
    pub fn into_result(self) -> Result<Appointment> {
        match self {
            ConfirmOutcome::Confirmed(appointment) => Ok(appointment),
            ConfirmOutcome::Conflict {
                appointment_id,
                conflicting_id,
            } => Err(AppError::Core(CoreError::Conflict {
                appointment_id,
                conflicting_id,
            })),
        }
    }
}

/// Booking operations over an injected store and clock.
#[derive(Debug)]
pub struct BookingService<S, C> {
    store: S,
    clock: C,
    config: Config,
}

impl<S: BookingStore, C: Clock> BookingService<S, C> {
    /// Creates a service.
    pub fn new(store: S, clock: C, config: Config) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current shop-local time.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Computes bookable slots for a barber on a date.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero duration or past date, or a
    /// store error.
    pub fn get_available_slots(
        &self,
        barber_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<TimeSlot>> {
        let barber_id = normalize_id("barber_id", barber_id)?;
        let slots = compute_available_slots(
            &self.store,
            &self.store,
            barber_id,
            date,
            duration_minutes,
            self.clock.now(),
        )?;
        debug!(
            barber_id,
            %date,
            duration_minutes,
            slots = slots.len(),
            "computed available slots"
        );
        Ok(slots)
    }

    /// Creates a pending appointment.
    ///
    /// The start time is checked against the barber's working hours for that
    /// weekday but not against other requests: overlapping pending requests
    /// are accepted and resolved when the barber confirms.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required field is empty
    /// - The service does not exist or is inactive
    /// - The start time is in the past or outside working hours
    /// - The store fails
    pub fn request_appointment(
        &self,
        client_id: &str,
        barber_id: &str,
        service_id: &str,
        scheduled_at: NaiveDateTime,
    ) -> Result<Appointment> {
        let request = NewAppointment {
            client_id: normalize_id("client_id", client_id)?.to_string(),
            barber_id: normalize_id("barber_id", barber_id)?.to_string(),
            service_id: normalize_id("service_id", service_id)?.to_string(),
            scheduled_at,
        };
        request.validate()?;

        let service = self.store.get_service(&request.service_id)?;
        if !service.active {
            return Err(CoreError::Validation(format!(
                "Service {} is not bookable",
                service.id
            ))
            .into());
        }

        let now = self.clock.now();
        if scheduled_at < now {
            return Err(CoreError::Validation(format!(
                "Requested time {} is in the past",
                scheduled_at
            ))
            .into());
        }

        let hours = self
            .store
            .working_hours(&request.barber_id, scheduled_at.weekday())?;
        let fits = hours.as_ref().is_some_and(|config| {
            config.active && within_open_hours(config, scheduled_at, service.duration_minutes)
        });
        if !fits {
            return Err(CoreError::Validation(format!(
                "Requested time {} is outside the working hours of {}",
                scheduled_at, request.barber_id
            ))
            .into());
        }

        for nonce in 0..MAX_ID_ATTEMPTS {
            let appointment = Appointment::new(request.clone(), service.duration_minutes, now, nonce);
            match self.store.insert_appointment(&appointment) {
                Ok(()) => {
                    info!(
                        appointment_id = %appointment.id,
                        client_id = %appointment.client_id,
                        barber_id = %appointment.barber_id,
                        scheduled_at = %appointment.scheduled_at,
                        "appointment requested"
                    );
                    return Ok(appointment);
                }
                Err(CoreError::DuplicateId(id)) => {
                    debug!(%id, nonce, "appointment ID collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(CoreError::DataSource(format!(
            "Could not allocate an appointment ID after {} attempts",
            MAX_ID_ATTEMPTS
        ))
        .into())
    }

    /// Confirms a pending appointment on behalf of its barber.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the appointment is not pending or
    /// belongs to another barber, or a store error. An occupied interval is
    /// reported as [`ConfirmOutcome::Conflict`], not as an error.
    pub fn confirm_appointment(&self, appointment_id: &str, barber_id: &str) -> Result<ConfirmOutcome> {
        let appointment_id = normalize_id("appointment_id", appointment_id)?;
        let actor = Actor::Barber(barber_id.to_string());
        match self.transition(appointment_id, Status::Confirmed, &actor)? {
            StatusUpdate::Applied(appointment) => Ok(ConfirmOutcome::Confirmed(appointment)),
            StatusUpdate::Conflict { conflicting_id } => Ok(ConfirmOutcome::Conflict {
                appointment_id: appointment_id.to_string(),
                conflicting_id,
            }),
            StatusUpdate::StaleStatus { actual } => Err(stale(appointment_id, actual)),
        }
    }

    /// Rejects an appointment on behalf of its barber.
    ///
    /// # Errors
    ///
    /// Same as [`BookingService::cancel_appointment`].
    pub fn reject_appointment(&self, appointment_id: &str, barber_id: &str) -> Result<Appointment> {
        self.cancel_appointment(appointment_id, &Actor::Barber(barber_id.to_string()))
    }

    /// Cancels a pending or confirmed appointment.
    ///
    /// When `enforce_cancellation_notice` is set, a client may not cancel a
    /// confirmed appointment starting within the notice window.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for terminal appointments or foreign
    /// actors, a validation error inside an enforced notice window, or a
    /// store error.
    pub fn cancel_appointment(&self, appointment_id: &str, actor: &Actor) -> Result<Appointment> {
        self.expect_applied(appointment_id, Status::Cancelled, actor)
    }

    /// Marks a past confirmed appointment as completed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the appointment is not confirmed, has
    /// not started yet, or `actor` is not its barber or the system.
    pub fn mark_completed(&self, appointment_id: &str, actor: &Actor) -> Result<Appointment> {
        self.expect_applied(appointment_id, Status::Completed, actor)
    }

    /// Marks a past confirmed appointment as a no-show.
    ///
    /// # Errors
    ///
    /// Same as [`BookingService::mark_completed`].
    pub fn mark_no_show(&self, appointment_id: &str, actor: &Actor) -> Result<Appointment> {
        self.expect_applied(appointment_id, Status::NoShow, actor)
    }

    /// Loads one appointment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a store error.
    pub fn get_appointment(&self, appointment_id: &str) -> Result<Appointment> {
        let appointment_id = normalize_id("appointment_id", appointment_id)?;
        Ok(self.store.get_appointment(appointment_id)?)
    }

    /// Lists appointments matching a filter, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let filter = AppointmentFilter {
            barber_id: filter.barber_id.as_deref().map(str::trim).map(str::to_string),
            client_id: filter.client_id.as_deref().map(str::trim).map(str::to_string),
            ..filter.clone()
        };
        Ok(self.store.list_appointments(&filter)?)
    }

    /// Resolves a full or partial appointment ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AmbiguousId`, or a store error.
    pub fn resolve_appointment_id(&self, partial: &str) -> Result<String> {
        let appointments = self.store.list_appointments(&AppointmentFilter::default())?;
        crate::ids::resolve_appointment_id(partial.trim(), &appointments)
    }

    /// Saves a barber's working hours for one weekday.
    ///
    /// # Errors
    ///
    /// Returns a validation or store error.
    pub fn set_working_hours(&self, config: &WorkingHoursConfig) -> Result<()> {
        let config = WorkingHoursConfig {
            barber_id: normalize_id("barber_id", &config.barber_id)?.to_string(),
            ..config.clone()
        };
        self.store.upsert_working_hours(&config)?;
        info!(
            barber_id = %config.barber_id,
            weekday = %config.weekday,
            active = config.active,
            "working hours saved"
        );
        Ok(())
    }

    /// Lists a barber's working hours, Monday first.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn working_hours(&self, barber_id: &str) -> Result<Vec<WorkingHoursConfig>> {
        let barber_id = normalize_id("barber_id", barber_id)?;
        Ok(self.store.list_working_hours(barber_id)?)
    }

    /// Adds a service to the catalog.
    ///
    /// Services are never merged: adding the same name twice yields two
    /// entries with distinct IDs.
    ///
    /// # Errors
    ///
    /// Returns a validation or store error.
    pub fn add_service(&self, name: &str, price_cents: u64, duration_minutes: u32) -> Result<Service> {
        let now = self.clock.now();
        for nonce in 0..MAX_ID_ATTEMPTS {
            let service = Service::new(name.trim().to_string(), price_cents, duration_minutes, now, nonce);
            match self.store.insert_service(&service) {
                Ok(()) => {
                    info!(service_id = %service.id, name = %service.name, "service added");
                    return Ok(service);
                }
                Err(CoreError::DuplicateId(id)) => {
                    debug!(%id, nonce, "service ID collision, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(CoreError::DataSource(format!(
            "Could not allocate a service ID after {} attempts",
            MAX_ID_ATTEMPTS
        ))
        .into())
    }

    /// Enables or disables booking of a service.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a store error.
    pub fn set_service_active(&self, service_id: &str, active: bool) -> Result<Service> {
        let service_id = normalize_id("service_id", service_id)?;
        let mut service = self.store.get_service(service_id)?;
        service.active = active;
        self.store.upsert_service(&service)?;
        info!(service_id = %service.id, active, "service availability changed");
        Ok(service)
    }

    /// Loads one service.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a store error.
    pub fn get_service(&self, service_id: &str) -> Result<Service> {
        let service_id = normalize_id("service_id", service_id)?;
        Ok(self.store.get_service(service_id)?)
    }

    /// Lists the service catalog.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.store.list_services()?)
    }

    fn expect_applied(&self, appointment_id: &str, target: Status, actor: &Actor) -> Result<Appointment> {
        let appointment_id = normalize_id("appointment_id", appointment_id)?;
        match self.transition(appointment_id, target, actor)? {
            StatusUpdate::Applied(appointment) => Ok(appointment),
            StatusUpdate::Conflict { conflicting_id } => Err(AppError::Core(CoreError::Conflict {
                appointment_id: appointment_id.to_string(),
                conflicting_id,
            })),
            StatusUpdate::StaleStatus { actual } => Err(stale(appointment_id, actual)),
        }
    }

    /// Authorizes and applies one transition.
    ///
    /// A stale read (the status moved between our read and the conditional
    /// write) is retried from a fresh read, where authorization and the
    /// cancellation notice see the new status.
    fn transition(&self, appointment_id: &str, target: Status, actor: &Actor) -> Result<StatusUpdate> {
        let normalized = normalize_actor(actor)?;
        let actor = &normalized;
        let mut last_seen = None;
        for _ in 0..MAX_STALE_RETRIES {
            let current = self.store.get_appointment(appointment_id)?;
            let now = self.clock.now();

            if let Err(err) = authorize(&current, target, actor, now) {
                error!(
                    appointment_id,
                    status = %current.status,
                    target = %target,
                    actor = %actor,
                    error = %err,
                    "rejected invalid transition"
                );
                return Err(err.into());
            }
            self.check_cancellation_notice(&current, target, actor, now)?;

            let update = self
                .store
                .update_appointment_status(appointment_id, current.status, target, actor, now)
                .inspect_err(|err| {
                    if matches!(err, CoreError::InvalidTransition(_)) {
                        error!(appointment_id, error = %err, "store rejected invalid transition");
                    }
                })?;

            match &update {
                StatusUpdate::Applied(appointment) => {
                    info!(
                        appointment_id,
                        from = %current.status,
                        to = %appointment.status,
                        actor = %actor,
                        "appointment status changed"
                    );
                    return Ok(update);
                }
                StatusUpdate::Conflict { conflicting_id } => {
                    warn!(
                        appointment_id,
                        conflicting_id = %conflicting_id,
                        "confirmation refused, interval already confirmed"
                    );
                    return Ok(update);
                }
                StatusUpdate::StaleStatus { actual } => {
                    warn!(
                        appointment_id,
                        expected = %current.status,
                        actual = %actual,
                        "status changed concurrently, retrying"
                    );
                    last_seen = Some(*actual);
                }
            }
        }

        let actual = match last_seen {
            Some(actual) => actual,
            None => self.store.get_appointment(appointment_id)?.status,
        };
        Ok(StatusUpdate::StaleStatus { actual })
    }

    /// Refuses a client cancelling a confirmed appointment inside the
    /// enforced notice window. Runs against the same read that feeds the
    /// conditional write, so a confirmation landing in between turns the
    /// write stale and the retry sees it.
    fn check_cancellation_notice(
        &self,
        current: &Appointment,
        target: Status,
        actor: &Actor,
        now: NaiveDateTime,
    ) -> Result<()> {
        if !self.config.enforce_cancellation_notice
            || target != Status::Cancelled
            || current.status != Status::Confirmed
            || !matches!(actor, Actor::Client(_))
        {
            return Ok(());
        }

        let notice = Duration::hours(i64::from(self.config.cancellation_notice_hours));
        if current.scheduled_at - now < notice {
            warn!(
                appointment_id = %current.id,
                actor = %actor,
                scheduled_at = %current.scheduled_at,
                "cancellation refused inside notice window"
            );
            return Err(CoreError::Validation(format!(
                "Appointments can only be cancelled at least {} hours in advance",
                self.config.cancellation_notice_hours
            ))
            .into());
        }
        Ok(())
    }
}

fn stale(appointment_id: &str, actual: Status) -> AppError {
    AppError::Core(CoreError::DataSource(format!(
        "Appointment {} kept changing status (last seen {})",
        appointment_id, actual
    )))
}
