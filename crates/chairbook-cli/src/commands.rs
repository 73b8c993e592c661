// Rust guideline compliant 2026-10-19

//! Command implementations for the Chairbook CLI.

pub mod cancel;
pub mod complete;
pub mod confirm;
pub mod hours;
pub mod init;
pub mod list;
pub mod request;
pub mod service;
pub mod show;
pub mod slots;

use crate::OutputFormatter;
use anyhow::Result;
use chairbook_app::{BookingService, Clock, DataDir, FixedClock, SystemClock};
use chairbook_core::Storage;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Booking service as driven by the CLI.
pub type CliService = BookingService<Storage, Arc<dyn Clock>>;

/// Settings shared by every command.
pub struct Context<'a> {
    data_dir: Option<PathBuf>,
    at: Option<NaiveDateTime>,
    formatter: &'a dyn OutputFormatter,
}

impl<'a> Context<'a> {
    /// Creates a command context.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Explicit data directory, `.chairbook` when absent
    /// * `at` - Shop-local time to evaluate commands at instead of now
    /// * `formatter` - Output formatter
    pub fn new(data_dir: Option<PathBuf>, at: Option<NaiveDateTime>, formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            data_dir,
            at,
            formatter,
        }
    }

    /// Returns the explicit data directory, if any.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Returns the output formatter.
    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter
    }

    /// Opens the booking service over an initialized data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is not initialized or its
    /// configuration is invalid.
    pub fn open_service(&self) -> Result<CliService> {
        let data_dir = DataDir::discover(self.data_dir())?;
        let at = self.at;
        let service = data_dir.open_service_with(|config| {
            let clock: Arc<dyn Clock> = match at {
                Some(at) => Arc::new(FixedClock::new(at)),
                None => Arc::new(SystemClock::new(config.utc_offset()?)),
            };
            Ok(clock)
        })?;
        Ok(service)
    }

    /// Prints formatted output to stdout.
    pub fn print(&self, output: String) {
        if !output.is_empty() {
            println!("{}", output);
        }
    }
}
