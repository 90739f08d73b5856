//! Start-up state shared by the command handlers

use std::path::PathBuf;

use clap::Args;
use log::debug;

use crate::api::{ApiClient, FileBackend, TransactionBackend};
use crate::config::{FinboardPaths, Settings};
use crate::display::DisplayOptions;
use crate::error::FinboardResult;
use crate::models::CalendarContext;
use crate::session::SessionContext;

/// Where records come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read records from a local JSON file instead of the backend
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Everything read once at start-up
#[derive(Debug)]
pub struct AppContext {
    pub paths: FinboardPaths,
    pub settings: Settings,
    pub session: SessionContext,
    pub calendar: CalendarContext,
}

impl AppContext {
    /// Resolve paths, load settings and the session, and read the clock
    pub fn load() -> FinboardResult<Self> {
        Self::with_paths(FinboardPaths::new()?)
    }

    pub fn with_paths(paths: FinboardPaths) -> FinboardResult<Self> {
        let settings = Settings::load_or_create(&paths)?.with_env_overrides();
        let session = SessionContext::load(&paths)?;
        let calendar = CalendarContext::current(settings.utc_offset_minutes);
        debug!(
            "data dir {}, api {}, year {}",
            paths.base_dir().display(),
            settings.api_base(),
            calendar.year
        );
        Ok(Self {
            paths,
            settings,
            session,
            calendar,
        })
    }

    pub fn display(&self) -> DisplayOptions {
        DisplayOptions::from_settings(&self.settings, &self.calendar)
    }

    /// Client carrying the stored session token, if any
    pub fn api_client(&self) -> FinboardResult<ApiClient> {
        Ok(ApiClient::new(self.settings.api_base())?
            .with_token(self.session.token().map(str::to_string)))
    }

    /// The file named by `--file`, or the backend
    ///
    /// With `create_file`, a missing file starts out empty.
    pub fn backend(
        &self,
        source: &SourceArgs,
        create_file: bool,
    ) -> FinboardResult<Box<dyn TransactionBackend>> {
        match &source.file {
            Some(path) if create_file => Ok(Box::new(FileBackend::open_or_create(path)?)),
            Some(path) => Ok(Box::new(FileBackend::open(path)?)),
            None => Ok(Box::new(self.api_client()?)),
        }
    }
}
