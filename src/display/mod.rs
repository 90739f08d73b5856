//! Display formatting for terminal output

pub mod summary;
pub mod table;

pub use summary::format_dashboard;
pub use table::{format_transaction_table, table_headers, table_row};

use chrono::FixedOffset;

use crate::config::Settings;
use crate::models::{CalendarContext, CreatedAt, Money};

/// Formatting preferences taken from the settings
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
    pub offset: FixedOffset,
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings, calendar: &CalendarContext) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
            offset: calendar.offset,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Timestamp in the configured format; unreadable timestamps are shown raw
    pub fn date(&self, created_at: &CreatedAt) -> String {
        match created_at.instant_at(&self.offset) {
            Some(instant) => instant
                .with_timezone(&self.offset)
                .format(&self.date_format)
                .to_string(),
            None => created_at.as_str().to_string(),
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default(), &CalendarContext::new(1970))
    }
}

/// Shorten `s` to at most `max` characters, ending in "..."
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
