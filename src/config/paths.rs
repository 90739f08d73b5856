//! Path management for finboard
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOARD_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/finboard` on Linux, `~/Library/Application Support/...` on
//!    macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{FinboardError, FinboardResult};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FINBOARD_DATA_DIR";

const APP: (&str, &str, &str) = ("dev", "finboard", "finboard");

/// Manages all paths used by finboard
#[derive(Debug, Clone)]
pub struct FinboardPaths {
    base_dir: PathBuf,
}

impl FinboardPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> FinboardResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };
        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to config.json
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to session.json (token, user id, theme)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    pub fn ensure_directories(&self) -> FinboardResult<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FinboardError::Io(format!(
                "Failed to create data directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

fn resolve_default_path() -> FinboardResult<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or_else(|| {
        FinboardError::Config("Could not determine platform-specific config dir".into())
    })?;
    Ok(proj.config_dir().to_path_buf())
}
