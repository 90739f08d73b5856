//! Time series for the line chart
//!
//! The year view has twelve monthly buckets, the month view one bucket per day
//! of the selected month. Series are always dense: every bucket is present,
//! empty buckets are zero.

use chrono::Datelike;
use serde::Serialize;

use crate::models::{
    CalendarContext, Money, Period, PeriodMode, TransactionKind, TransactionRecord, MONTH_LABELS,
};

/// One series, or an income and an expense series side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Combined(Vec<Money>),
    ByKind {
        income: Vec<Money>,
        expense: Vec<Money>,
    },
}

impl Series {
    /// Number of buckets
    pub fn len(&self) -> usize {
        match self {
            Self::Combined(values) => values.len(),
            Self::ByKind { income, .. } => income.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of buckets for a period
pub fn bucket_count(period: Period, calendar: &CalendarContext) -> usize {
    match period.mode {
        PeriodMode::Year => 12,
        PeriodMode::Month => calendar.days_in_month(period.selected_month) as usize,
    }
}

/// Bucket a record falls into, if any
///
/// In the month view only records of the selected month (of any year) have a
/// bucket.
pub fn bucket_index(
    record: &TransactionRecord,
    period: Period,
    calendar: &CalendarContext,
) -> Option<usize> {
    let date = record.created_at.date_at(&calendar.offset)?;
    match period.mode {
        PeriodMode::Year => Some(date.month0() as usize),
        PeriodMode::Month => {
            if date.month0() != period.selected_month {
                return None;
            }
            let day = date.day() as usize;
            // Feb 29 of a leap year has no slot in a non-leap current year
            (day <= bucket_count(period, calendar)).then(|| day - 1)
        }
    }
}

/// One dense series, optionally restricted to a single kind
pub fn series_for(
    records: &[TransactionRecord],
    period: Period,
    calendar: &CalendarContext,
    kind: Option<TransactionKind>,
) -> Vec<Money> {
    let mut buckets = vec![Money::zero(); bucket_count(period, calendar)];

    for record in records {
        if kind.is_some_and(|k| k != record.kind) {
            continue;
        }
        if let Some(i) = bucket_index(record, period, calendar) {
            buckets[i] += record.amount;
        }
    }

    buckets
}

/// Series for the line chart; `split_by_kind` yields income and expense apart
pub fn by_series(
    records: &[TransactionRecord],
    period: Period,
    calendar: &CalendarContext,
    split_by_kind: bool,
) -> Series {
    if split_by_kind {
        Series::ByKind {
            income: series_for(records, period, calendar, Some(TransactionKind::Income)),
            expense: series_for(records, period, calendar, Some(TransactionKind::Expense)),
        }
    } else {
        Series::Combined(series_for(records, period, calendar, None))
    }
}

/// X-axis labels matching the buckets of `period`
pub fn series_labels(period: Period, calendar: &CalendarContext) -> Vec<String> {
    match period.mode {
        PeriodMode::Year => MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
        PeriodMode::Month => (1..=bucket_count(period, calendar))
            .map(|d| d.to_string())
            .collect(),
    }
}
