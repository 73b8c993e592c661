// Rust guideline compliant 2026-10-19

//! Configuration management for Chairbook.

use crate::Result;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

/// Longest cancellation notice window accepted, in hours.
const MAX_NOTICE_HOURS: u32 = 720;

/// Widest UTC offset accepted, in minutes.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Configuration for Chairbook behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed UTC offset of the shop's wall clock, in minutes.
    ///
    /// All appointment times are naive shop-local values; this offset is
    /// only used to derive "now" from the system clock.
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,

    /// Cancellation notice shown to clients, in hours.
    #[serde(default = "default_notice_hours")]
    pub cancellation_notice_hours: u32,

    /// Whether clients are blocked from cancelling a confirmed appointment
    /// inside the notice window.
    #[serde(default)]
    pub enforce_cancellation_notice: bool,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Default offset (UTC-03:00).
fn default_utc_offset() -> i32 {
    -180
}

/// Default notice window in hours.
fn default_notice_hours() -> u32 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset(),
            cancellation_notice_hours: default_notice_hours(),
            enforce_cancellation_notice: false,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `<data-dir>/config.toml`
    /// 3. Environment variables with `CHAIRBOOK_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = data_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| crate::Error::Validation(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CHAIRBOOK_UTC_OFFSET_MINUTES` - Shop UTC offset in minutes
    /// - `CHAIRBOOK_CANCELLATION_NOTICE_HOURS` - Notice window in hours
    /// - `CHAIRBOOK_ENFORCE_CANCELLATION_NOTICE` - Enforce notice (true/false)
    /// - `CHAIRBOOK_OUTPUT_FORMAT` - Output format (json/table/plain)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CHAIRBOOK_UTC_OFFSET_MINUTES") {
            self.utc_offset_minutes = val.parse().map_err(|_| {
                crate::Error::Validation(
                    "CHAIRBOOK_UTC_OFFSET_MINUTES must be a whole number of minutes".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("CHAIRBOOK_CANCELLATION_NOTICE_HOURS") {
            self.cancellation_notice_hours = val.parse().map_err(|_| {
                crate::Error::Validation(
                    "CHAIRBOOK_CANCELLATION_NOTICE_HOURS must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("CHAIRBOOK_ENFORCE_CANCELLATION_NOTICE") {
            self.enforce_cancellation_notice = val.parse().map_err(|_| {
                crate::Error::Validation(
                    "CHAIRBOOK_ENFORCE_CANCELLATION_NOTICE must be true or false".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("CHAIRBOOK_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(crate::Error::Validation(
                        "CHAIRBOOK_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset exceeds ±14 hours or the notice window
    /// exceeds 30 days.
    fn validate(&self) -> Result<()> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(crate::Error::Validation(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }

        if self.cancellation_notice_hours > MAX_NOTICE_HOURS {
            return Err(crate::Error::Validation(format!(
                "cancellation_notice_hours must be at most {}, got {}",
                MAX_NOTICE_HOURS, self.cancellation_notice_hours
            )));
        }

        Ok(())
    }

    /// The shop's fixed UTC offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is out of range.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            crate::Error::Validation(format!(
                "Invalid UTC offset: {} minutes",
                self.utc_offset_minutes
            ))
        })
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let config_path = data_dir.join("config.toml");
        let content = toml::to_string_pretty(self).map_err(|e| {
            crate::Error::Validation(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        std::env::remove_var("CHAIRBOOK_UTC_OFFSET_MINUTES");
        std::env::remove_var("CHAIRBOOK_CANCELLATION_NOTICE_HOURS");
        std::env::remove_var("CHAIRBOOK_ENFORCE_CANCELLATION_NOTICE");
        std::env::remove_var("CHAIRBOOK_OUTPUT_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.utc_offset_minutes, -180);
        assert_eq!(config.cancellation_notice_hours, 24);
        assert!(!config.enforce_cancellation_notice);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_config_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.utc_offset_minutes, -180);
        assert_eq!(config.cancellation_notice_hours, 24);
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let content = r#"
utc_offset_minutes = 60
cancellation_notice_hours = 12
enforce_cancellation_notice = true
output_format = "json"
"#;
        std::fs::write(temp_dir.path().join("config.toml"), content).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.utc_offset_minutes, 60);
        assert_eq!(config.cancellation_notice_hours, 12);
        assert!(config.enforce_cancellation_notice);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_config_validation_invalid_offset() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "utc_offset_minutes = 900").unwrap();
        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_validation_notice_too_long() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "cancellation_notice_hours = 1000",
        )
        .unwrap();
        assert!(Config::load(temp_dir.path()).is_err());
    }

    #[test]
    fn test_config_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "utc_offset_minutes = 0").unwrap();

        std::env::set_var("CHAIRBOOK_UTC_OFFSET_MINUTES", "120");
        std::env::set_var("CHAIRBOOK_ENFORCE_CANCELLATION_NOTICE", "true");
        std::env::set_var("CHAIRBOOK_OUTPUT_FORMAT", "plain");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.utc_offset_minutes, 120);
        assert!(config.enforce_cancellation_notice);
        assert_eq!(config.output_format, OutputFormat::Plain);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("CHAIRBOOK_CANCELLATION_NOTICE_HOURS", "soon");
        assert!(Config::load(temp_dir.path()).is_err());
        clear_all_env_vars();

        std::env::set_var("CHAIRBOOK_OUTPUT_FORMAT", "yaml");
        assert!(Config::load(temp_dir.path()).is_err());
        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let original = Config {
            utc_offset_minutes: 330,
            cancellation_notice_hours: 48,
            enforce_cancellation_notice: true,
            output_format: OutputFormat::Json,
        };
        original.save(temp_dir.path()).unwrap();
        let loaded = Config::load(temp_dir.path()).unwrap();

        assert_eq!(original.utc_offset_minutes, loaded.utc_offset_minutes);
        assert_eq!(
            original.cancellation_notice_hours,
            loaded.cancellation_notice_hours
        );
        assert_eq!(
            original.enforce_cancellation_notice,
            loaded.enforce_cancellation_notice
        );
        assert_eq!(original.output_format, loaded.output_format);
        assert_eq!(loaded.utc_offset().unwrap().local_minus_utc(), 330 * 60);
    }
}
