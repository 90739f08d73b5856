//! Transaction filter
//!
//! Narrows a record list by kind and by period. The month check compares the
//! month of the year only; a record from March of any year matches "March".

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinboardError;
use crate::models::{CalendarContext, Period, PeriodMode, TransactionKind, TransactionRecord};

/// Which side of the ledger is in view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// The single kind this filter selects, or `None` for `All`
    pub fn kind(&self) -> Option<TransactionKind> {
        match self {
            Self::All => None,
            Self::Income => Some(TransactionKind::Income),
            Self::Expense => Some(TransactionKind::Expense),
        }
    }

    /// Check if a kind passes this filter
    pub fn admits(&self, kind: TransactionKind) -> bool {
        self.kind().map_or(true, |k| k == kind)
    }
}

impl From<TransactionKind> for TypeFilter {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TransactionKind::parse(s).map(Self::from).ok_or_else(|| {
            FinboardError::Validation(format!(
                "Invalid type filter: '{}'. Valid values: all, income, expense",
                s
            ))
        })
    }
}

/// Filter options for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub type_filter: TypeFilter,
    pub period: Period,
}

impl TransactionFilter {
    /// Create a filter that keeps everything in the year view
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by kind
    pub fn type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    /// Filter by period
    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &TransactionRecord, calendar: &CalendarContext) -> bool {
        if !self.type_filter.admits(record.kind) {
            return false;
        }

        match self.period.mode {
            PeriodMode::Year => true,
            PeriodMode::Month => {
                record.created_at.month0_at(&calendar.offset) == Some(self.period.selected_month)
            }
        }
    }

    /// Return the matching records, in input order
    pub fn apply(
        &self,
        records: &[TransactionRecord],
        calendar: &CalendarContext,
    ) -> Vec<TransactionRecord> {
        let kept: Vec<TransactionRecord> = records
            .iter()
            .filter(|r| self.matches(r, calendar))
            .cloned()
            .collect();

        debug!(
            "filter type={} period={}: kept {} of {} records",
            self.type_filter,
            self.period,
            kept.len(),
            records.len()
        );
        kept
    }
}

/// Narrow `records` by kind and period
pub fn filter(
    records: &[TransactionRecord],
    type_filter: TypeFilter,
    period: Period,
    calendar: &CalendarContext,
) -> Vec<TransactionRecord> {
    TransactionFilter::new()
        .type_filter(type_filter)
        .period(period)
        .apply(records, calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatedAt, Money};

    fn rec(id: &str, created_at: &str, cents: i64, kind: TransactionKind) -> TransactionRecord {
        TransactionRecord::new(id, CreatedAt::new(created_at), Money::from_cents(cents), kind)
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            rec("a", "2024-01-15", 10000, TransactionKind::Income),
            rec("b", "2024-01-20", 3000, TransactionKind::Expense),
            rec("c", "2024-03-02", 500, TransactionKind::Expense),
            rec("d", "2019-03-28", 700, TransactionKind::Income),
            rec("e", "garbage", 900, TransactionKind::Expense),
        ]
    }

    fn ids(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_all_year_keeps_everything() {
        let cal = CalendarContext::new(2024);
        let out = filter(&sample(), TypeFilter::All, Period::year(), &cal);
        assert_eq!(ids(&out), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_type_filter_preserves_order() {
        let cal = CalendarContext::new(2024);
        let out = filter(&sample(), TypeFilter::Expense, Period::year(), &cal);
        assert_eq!(ids(&out), vec!["b", "c", "e"]);

        let out = filter(&sample(), TypeFilter::Income, Period::year(), &cal);
        assert_eq!(ids(&out), vec!["a", "d"]);
    }

    #[test]
    fn test_month_filter_ignores_year() {
        let cal = CalendarContext::new(2024);
        let out = filter(&sample(), TypeFilter::All, Period::month(2), &cal);
        assert_eq!(ids(&out), vec!["c", "d"]);
    }

    #[test]
    fn test_type_and_month_combined() {
        let cal = CalendarContext::new(2024);
        let out = filter(&sample(), TypeFilter::Income, Period::month(2), &cal);
        assert_eq!(ids(&out), vec!["d"]);
    }

    #[test]
    fn test_malformed_timestamp_never_matches_a_month() {
        let cal = CalendarContext::new(2024);
        for month in 0..12 {
            let out = filter(&sample(), TypeFilter::All, Period::month(month), &cal);
            assert!(!ids(&out).contains(&"e"));
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let cal = CalendarContext::new(2024);
        let records = sample();
        let before = records.clone();
        let _ = filter(&records, TypeFilter::Expense, Period::month(0), &cal);
        assert_eq!(records, before);
    }

    #[test]
    fn test_type_filter_parse() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!("Income".parse::<TypeFilter>().unwrap(), TypeFilter::Income);
        assert_eq!("saida".parse::<TypeFilter>().unwrap(), TypeFilter::Expense);
        assert!("both".parse::<TypeFilter>().is_err());
    }
}
