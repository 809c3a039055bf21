//! User settings for the expense tracker
//!
//! Manages user preferences such as the currency symbol, the storage key the
//! expense collection lives under, and the log level.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::storage::file_io::write_json_atomic;

/// Storage key the expense collection is persisted under by default
pub const DEFAULT_STORAGE_KEY: &str = "expense-tracker-data";

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of this settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key the expense collection is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether add/delete operations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            storage_key: default_storage_key(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.storage_key.trim().is_empty() {
            return Err(ExpenseError::Config("storage_key must not be empty".into()));
        }
        validate_date_format(&settings.date_format)?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

/// A date format must render a plain calendar date; time fields have nothing to show
fn validate_date_format(format: &str) -> Result<(), ExpenseError> {
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(format)).map_err(|_| {
        ExpenseError::Config(format!(
            "date_format '{}' is not a valid date format",
            format
        ))
    })
}
