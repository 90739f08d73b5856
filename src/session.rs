//! Session and theme context
//!
//! Holds the auth token, the signed-in user's id and the dark-mode flag. The
//! context is read once at start-up, passed down explicitly, and written back
//! after each change.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::FinboardPaths;
use crate::error::{FinboardError, FinboardResult};
use crate::storage::{read_json, write_json_atomic};

/// Persisted part of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default)]
    pub dark_mode: bool,
}

/// Session bound to the file it was loaded from
#[derive(Debug, Clone)]
pub struct SessionContext {
    path: PathBuf,
    state: SessionState,
}

impl SessionContext {
    /// Read the session from the data directory; a missing file is an empty session
    pub fn load(paths: &FinboardPaths) -> FinboardResult<Self> {
        Self::load_from(paths.session_file())
    }

    pub fn load_from(path: impl Into<PathBuf>) -> FinboardResult<Self> {
        let path = path.into();
        let state = read_json(&path)?;
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    /// The token, or `NotAuthenticated`
    pub fn require_token(&self) -> FinboardResult<&str> {
        self.token().ok_or(FinboardError::NotAuthenticated)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.state.user_id.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.token.is_some()
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    /// Store the credentials returned by a successful login
    pub fn sign_in(&mut self, token: impl Into<String>, user_id: impl Into<String>) -> FinboardResult<()> {
        let user_id = user_id.into();
        info!("session: signed in as user {}", user_id);
        self.state.token = Some(token.into());
        self.state.user_id = Some(user_id);
        self.save()
    }

    /// Drop the credentials; the theme preference stays
    pub fn sign_out(&mut self) -> FinboardResult<()> {
        info!("session: signed out");
        self.state.token = None;
        self.state.user_id = None;
        self.save()
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> FinboardResult<()> {
        self.state.dark_mode = dark;
        self.save()
    }

    fn save(&self) -> FinboardResult<()> {
        write_json_atomic(&self.path, &self.state)
    }
}
