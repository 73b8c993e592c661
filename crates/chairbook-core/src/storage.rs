// Rust guideline compliant 2026-10-19

//! Storage module for JSONL file operations.
//!
//! A data directory holds one JSONL file per record type. Reads stream the
//! file and validate every record; writes rewrite the whole file through a
//! temp file and an atomic rename. Every read-modify-write runs under an
//! exclusive file lock on `<data-dir>/.lock`, which serializes writers
//! across threads and processes.

use crate::availability::{BookingSource, WorkingHoursSource};
use crate::models::{Actor, Appointment, BookedInterval, Service, Status, WorkingHoursConfig};
use crate::store::{self, AppointmentFilter, AppointmentStore, ScheduleStore, StatusUpdate};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File holding appointments.
pub const APPOINTMENTS_FILE: &str = "appointments.jsonl";

/// File holding working-hours rows.
pub const WORKING_HOURS_FILE: &str = "working_hours.jsonl";

/// File holding the service catalog.
pub const SERVICES_FILE: &str = "services.jsonl";

const LOCK_FILE: &str = ".lock";

/// A record that can be checked when it enters the core from disk.
pub trait Record: Serialize + DeserializeOwned {
    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated invariant.
    fn validate_record(&self) -> Result<()>;
}

impl Record for Appointment {
    fn validate_record(&self) -> Result<()> {
        self.validate()
    }
}

impl Record for WorkingHoursConfig {
    fn validate_record(&self) -> Result<()> {
        self.validate()
    }
}

impl Record for Service {
    fn validate_record(&self) -> Result<()> {
        self.validate()
    }
}

/// Storage engine for Chairbook data.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the data directory.
    dir: PathBuf,
}

impl Storage {
    /// Creates a new Storage instance over an existing data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(dir: PathBuf) -> Result<Self> {
        if dir.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(Self { dir })
    }

    /// Creates the data directory and empty data files if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be created.
    pub fn init(dir: PathBuf) -> Result<Self> {
        let storage = Self::new(dir)?;
        std::fs::create_dir_all(&storage.dir)?;
        for name in [APPOINTMENTS_FILE, WORKING_HOURS_FILE, SERVICES_FILE] {
            let path = storage.dir.join(name);
            if !path.exists() {
                std::fs::File::create(&path)?;
            }
        }
        Ok(storage)
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads every record from a data file.
    ///
    /// A missing file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The file contains invalid JSON
    /// - A record fails validation
    pub fn load_all<T: Record>(&self, file_name: &str) -> Result<Vec<T>> {
        use std::fs::File;
        use std::io::BufReader;

        let path = self.dir.join(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut records = Vec::new();
        for result in serde_json::Deserializer::from_reader(reader).into_iter::<T>() {
            let record = result?;
            record.validate_record()?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replaces a data file with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any record fails validation
    /// - The temp file cannot be written
    /// - The atomic rename fails
    pub fn save_all<T: Record>(&self, file_name: &str, records: &[T]) -> Result<()> {
        use std::fs::File;
        use std::io::{BufWriter, Write};

        for record in records {
            record.validate_record()?;
        }

        let path = self.dir.join(file_name);
        let temp_path = path.with_extension("jsonl.tmp");

        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }

        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Executes a closure with an exclusive lock on the data directory.
    ///
    /// Blocks until the lock is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired or the closure fails.
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;

        lock_file.lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        let result = f();

        // Released on drop as well; an unlock failure must not mask `result`.
        let _ = lock_file.unlock();

        result
    }
}

impl WorkingHoursSource for Storage {
    fn working_hours(&self, barber_id: &str, weekday: Weekday) -> Result<Option<WorkingHoursConfig>> {
        let rows: Vec<WorkingHoursConfig> = self.load_all(WORKING_HOURS_FILE)?;
        Ok(rows
            .into_iter()
            .find(|row| row.barber_id == barber_id && row.weekday == weekday))
    }
}

impl BookingSource for Storage {
    fn confirmed_appointments(&self, barber_id: &str, date: NaiveDate) -> Result<Vec<BookedInterval>> {
        let appointments: Vec<Appointment> = self.load_all(APPOINTMENTS_FILE)?;
        Ok(store::confirmed_on(&appointments, barber_id, date))
    }
}

impl AppointmentStore for Storage {
    fn insert_appointment(&self, appointment: &Appointment) -> Result<()> {
        appointment.validate()?;
        self.with_lock(|| {
            let mut appointments: Vec<Appointment> = self.load_all(APPOINTMENTS_FILE)?;
            if appointments.iter().any(|a| a.id == appointment.id) {
                return Err(Error::DuplicateId(appointment.id.clone()));
            }
            appointments.push(appointment.clone());
            self.save_all(APPOINTMENTS_FILE, &appointments)
        })
    }

    fn get_appointment(&self, id: &str) -> Result<Appointment> {
        let appointments: Vec<Appointment> = self.load_all(APPOINTMENTS_FILE)?;
        appointments
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self.load_all(APPOINTMENTS_FILE)?;
        appointments.retain(|a| filter.matches(a));
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
        self.with_lock(|| {
            let mut appointments: Vec<Appointment> = self.load_all(APPOINTMENTS_FILE)?;
            let update = store::apply_status_update(&mut appointments, id, expected, to, actor, at)?;
            if matches!(update, StatusUpdate::Applied(_)) {
                self.save_all(APPOINTMENTS_FILE, &appointments)?;
            }
            Ok(update)
        })
    }
}

impl ScheduleStore for Storage {
    fn upsert_working_hours(&self, config: &WorkingHoursConfig) -> Result<()> {
        config.validate()?;
        self.with_lock(|| {
            let mut rows: Vec<WorkingHoursConfig> = self.load_all(WORKING_HOURS_FILE)?;
            rows.retain(|row| !(row.barber_id == config.barber_id && row.weekday == config.weekday));
            rows.push(config.clone());
            self.save_all(WORKING_HOURS_FILE, &rows)
        })
    }

    fn list_working_hours(&self, barber_id: &str) -> Result<Vec<WorkingHoursConfig>> {
        let mut rows: Vec<WorkingHoursConfig> = self.load_all(WORKING_HOURS_FILE)?;
        rows.retain(|row| row.barber_id == barber_id);
        rows.sort_by_key(|row| row.weekday.num_days_from_monday());
        Ok(rows)
    }

    fn insert_service(&self, service: &Service) -> Result<()> {
        service.validate()?;
        self.with_lock(|| {
            let mut services: Vec<Service> = self.load_all(SERVICES_FILE)?;
            if services.iter().any(|s| s.id == service.id) {
                return Err(Error::DuplicateId(service.id.clone()));
            }
            services.push(service.clone());
            self.save_all(SERVICES_FILE, &services)
        })
    }

    fn upsert_service(&self, service: &Service) -> Result<()> {
        service.validate()?;
        self.with_lock(|| {
            let mut services: Vec<Service> = self.load_all(SERVICES_FILE)?;
            services.retain(|s| s.id != service.id);
            services.push(service.clone());
            self.save_all(SERVICES_FILE, &services)
        })
    }

    fn get_service(&self, id: &str) -> Result<Service> {
        let services: Vec<Service> = self.load_all(SERVICES_FILE)?;
        services
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list_services(&self) -> Result<Vec<Service>> {
        let mut services: Vec<Service> = self.load_all(SERVICES_FILE)?;
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }
}
