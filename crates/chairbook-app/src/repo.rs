// Rust guideline compliant 2026-10-19

//! Data directory discovery and path management.

use crate::clock::{Clock, SystemClock};
use crate::error::{AppError, Result};
use crate::service::BookingService;
use chairbook_core::{Config, Storage};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the data directory created by `chb init`.
pub const DATA_DIR_NAME: &str = ".chairbook";

/// Path metadata for a Chairbook data directory.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    config_path: PathBuf,
}

impl DataDir {
    /// Resolves the data directory location without checking it exists.
    ///
    /// An explicit path is used as-is; otherwise `.chairbook` under the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn locate(data_dir: Option<&Path>) -> Result<Self> {
        let root = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?.join(DATA_DIR_NAME),
        };
        Ok(Self {
            config_path: root.join("config.toml"),
            root,
        })
    }

    /// Locates an existing, initialized data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be determined
    /// - The data directory is missing
    pub fn discover(data_dir: Option<&Path>) -> Result<Self> {
        let located = Self::locate(data_dir)?;
        if !located.root.is_dir() {
            return Err(AppError::NotInitialized {
                path: located.root.clone(),
            });
        }
        Ok(located)
    }

    /// Creates the data directory, its data files, and a default config.
    ///
    /// Existing files are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or files cannot be written.
    pub fn init(data_dir: Option<&Path>) -> Result<Self> {
        let located = Self::locate(data_dir)?;
        Storage::init(located.root.clone())?;
        if !located.config_path.exists() {
            Config::default().save(&located.root)?;
        }
        info!(path = %located.root.display(), "initialized data directory");
        Ok(located)
    }

    /// Returns the data directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens the JSONL storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be opened.
    pub fn open_storage(&self) -> Result<Storage> {
        Ok(Storage::new(self.root.clone())?)
    }

    /// Loads configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.root())?)
    }

    /// Builds a booking service over the storage.
    ///
    /// `make_clock` receives the loaded configuration so callers can derive
    /// the shop offset or pin a fixed time.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or storage cannot be loaded, or
    /// if `make_clock` fails.
    pub fn open_service_with<C, F>(&self, make_clock: F) -> Result<BookingService<Storage, C>>
    where
        C: Clock,
        F: FnOnce(&Config) -> Result<C>,
    {
        let config = self.load_config()?;
        let clock = make_clock(&config)?;
        Ok(BookingService::new(self.open_storage()?, clock, config))
    }

    /// Builds a booking service running on the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or storage cannot be loaded.
    pub fn open_service(&self) -> Result<BookingService<Storage, SystemClock>> {
        self.open_service_with(|config| Ok(SystemClock::new(config.utc_offset()?)))
    }
}
