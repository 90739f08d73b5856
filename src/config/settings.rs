//! User settings for finboard
//!
//! Backend location, display preferences and the UTC offset used to read
//! calendar months and days off record timestamps.

use serde::{Deserialize, Serialize};

use super::paths::FinboardPaths;
use crate::error::{FinboardError, FinboardResult};
use crate::storage::write_json_atomic;

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "FINBOARD_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the backend, without a trailing slash
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for the table's date column
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Offset from UTC, in minutes, for month and day extraction
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &FinboardPaths) -> FinboardResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinboardError::Io(format!("Failed to read settings file: {}", e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| FinboardError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Settings with environment overrides applied
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        self
    }

    /// `api_url` without trailing slashes
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn save(&self, paths: &FinboardPaths) -> FinboardResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
