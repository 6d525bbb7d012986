//! User settings for the budget tracker
//!
//! Manages display and import/export preferences. Settings are configuration
//! only; no ledger data is ever written here.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::Currency;
use crate::services::schema::{check_date_format, DEFAULT_DATE_FORMAT};

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Display currency
    #[serde(default)]
    pub currency: Currency,

    /// strftime format for dates written by exports
    #[serde(default = "default_export_date_format")]
    pub export_date_format: String,

    /// Field delimiter for CSV import
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,
}

fn default_schema_version() -> u32 {
    1
}

fn default_export_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_csv_delimiter() -> char {
    ','
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            export_date_format: default_export_date_format(),
            csv_delimiter: default_csv_delimiter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            TrackerError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Delimiter as a single byte, as the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8, TrackerError> {
        u8::try_from(self.csv_delimiter)
            .ok()
            .filter(|b| b.is_ascii() && !b.is_ascii_alphanumeric() && *b != b'"')
            .ok_or_else(|| {
                TrackerError::Config(format!(
                    "CSV delimiter must be a single ASCII punctuation or whitespace character, got '{}'",
                    self.csv_delimiter
                ))
            })
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if self.export_date_format.trim().is_empty() {
            return Err(TrackerError::Config(
                "export_date_format must not be empty".into(),
            ));
        }
        check_date_format(&self.export_date_format).map_err(TrackerError::Config)?;
        self.delimiter_byte().map(|_| ())
    }
}
