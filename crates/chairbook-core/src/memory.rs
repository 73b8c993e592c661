// Rust guideline compliant 2026-10-19

//! In-process store backed by a single mutex.
//!
//! Every operation takes the same lock, so the overlap check and the write
//! of a confirmation are one atomic step for all threads sharing the store.

use crate::availability::{BookingSource, WorkingHoursSource};
use crate::models::{Actor, Appointment, BookedInterval, Service, Status, WorkingHoursConfig};
use crate::store::{self, AppointmentFilter, AppointmentStore, ScheduleStore, StatusUpdate};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    appointments: Vec<Appointment>,
    working_hours: Vec<WorkingHoursConfig>,
    services: Vec<Service>,
}

/// Thread-safe in-memory implementation of every data-source trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| Error::DataSource("memory store lock poisoned".to_string()))
    }
}

impl WorkingHoursSource for MemoryStore {
    fn working_hours(&self, barber_id: &str, weekday: Weekday) -> Result<Option<WorkingHoursConfig>> {
        let state = self.lock()?;
        Ok(state
            .working_hours
            .iter()
            .find(|row| row.barber_id == barber_id && row.weekday == weekday)
            .cloned())
    }
}

impl BookingSource for MemoryStore {
    fn confirmed_appointments(&self, barber_id: &str, date: NaiveDate) -> Result<Vec<BookedInterval>> {
        let state = self.lock()?;
        Ok(store::confirmed_on(&state.appointments, barber_id, date))
    }
}

impl AppointmentStore for MemoryStore {
    fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        appointment.validate()?;
        let mut state = self.lock()?;
        if state.appointments.iter().any(|a| a.id == appointment.id) {
            return Err(Error::DuplicateId(appointment.id.clone()));
        }
        state.appointments.push(appointment.clone());
        Ok(())
    }

    fn get_appointment(&self, id: &str) -> Result<Appointment> {
        let state = self.lock()?;
        state
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let state = self.lock()?;
        let mut appointments: Vec<Appointment> = state
            .appointments
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        store::sort_appointments(&mut appointments);
        Ok(appointments)
    }

    fn update_appointment_status(
        &self,
        id: &str,
        expected: Status,
        to: Status,
        actor: &Actor,
        at: NaiveDateTime,
    ) -> Result<StatusUpdate> {
        let mut state = self.lock()?;
        store::apply_status_update(&mut state.appointments, id, expected, to, actor, at)
    }
}

impl ScheduleStore for MemoryStore {
    fn upsert_working_hours(&self, config: &WorkingHoursConfig) -> Result<()> {
        config.validate()?;
        let mut state = self.lock()?;
        state
            .working_hours
            .retain(|row| !(row.barber_id == config.barber_id && row.weekday == config.weekday));
        state.working_hours.push(config.clone());
        Ok(())
    }

    fn list_working_hours(&self, barber_id: &str) -> Result<Vec<WorkingHoursConfig>> {
        let state = self.lock()?;
        let mut rows: Vec<WorkingHoursConfig> = state
            .working_hours
            .iter()
            .filter(|row| row.barber_id == barber_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.weekday.num_days_from_monday());
        Ok(rows)
    }

    fn insert_service(&self, service: &Service) -> Result<()> {
        service.validate()?;
        let mut state = self.lock()?;
        if state.services.iter().any(|s| s.id == service.id) {
            return Err(Error::DuplicateId(service.id.clone()));
        }
        state.services.push(service.clone());
        Ok(())
    }

    fn upsert_service(&self, service: &Service) -> Result<()> {
        service.validate()?;
        let mut state = self.lock()?;
        state.services.retain(|s| s.id != service.id);
        state.services.push(service.clone());
        Ok(())
    }

    fn get_service(&self, id: &str) -> Result<Service> {
        let state = self.lock()?;
        state
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list_services(&self) -> Result<Vec<Service>> {
        let state = self.lock()?;
        let mut services = state.services.clone();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }
}
