//! Reporting period representation
//!
//! The dashboard looks at either a whole year (twelve monthly buckets) or a
//! single month (one bucket per day). Months are zero-indexed (0 = January)
//! everywhere in the public API.

use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the dashboard scope is a full year or a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    #[default]
    Year,
    Month,
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
        }
    }
}

/// Period selection: the mode plus the selected month (0-11)
///
/// `selected_month` is carried in both modes, mirroring the dashboard where the
/// month picker keeps its value while the year view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub mode: PeriodMode,
    pub selected_month: u32,
}

impl Period {
    /// The full-year view
    pub fn year() -> Self {
        Self {
            mode: PeriodMode::Year,
            selected_month: 0,
        }
    }

    /// A single month, zero-indexed (0 = January). Values above 11 are clamped.
    pub fn month(selected_month: u32) -> Self {
        Self {
            mode: PeriodMode::Month,
            selected_month: selected_month.min(11),
        }
    }

    /// Check if this is the single-month view
    pub fn is_month(&self) -> bool {
        self.mode == PeriodMode::Month
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::year()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            PeriodMode::Year => write!(f, "Year"),
            PeriodMode::Month => {
                let label = MONTH_LABELS.get(self.selected_month as usize).unwrap_or(&"?");
                write!(f, "{}", label)
            }
        }
    }
}

/// Short month labels used for the yearly series
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The "current year" and the offset used to read calendar fields
///
/// Only the front end reads the system clock; everything below it receives this
/// value so that results do not depend on when they are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    pub year: i32,
    pub offset: FixedOffset,
}

impl CalendarContext {
    /// Create a context for the given year, reading dates in UTC
    pub fn new(year: i32) -> Self {
        Self {
            year,
            offset: utc(),
        }
    }

    /// Create a context with an explicit offset in minutes east of UTC
    ///
    /// Offsets outside +-24h fall back to UTC.
    pub fn with_offset_minutes(year: i32, minutes: i32) -> Self {
        Self {
            year,
            offset: minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .unwrap_or_else(utc),
        }
    }

    /// Build the context from the system clock
    pub fn current(offset_minutes: i32) -> Self {
        let base = Self::with_offset_minutes(0, offset_minutes);
        let year = Utc::now().with_timezone(&base.offset).year();
        Self { year, ..base }
    }

    /// Number of days in a zero-indexed month of the context year
    pub fn days_in_month(&self, month0: u32) -> u32 {
        days_in_month(self.year, month0 + 1)
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Number of days in a one-indexed month, accounting for leap years
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (NaiveDate::from_ymd_opt(year, month, 1), next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 31,
    }
}
