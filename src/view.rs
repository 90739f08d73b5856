//! View composition
//!
//! Wires the filter, the aggregations and the sorter together into the data
//! each dashboard widget needs. Nothing here holds state across calls except
//! [`TableView`], which remembers the display order and the active column the
//! way the table widget does.

use log::{debug, warn};
use serde::Serialize;

use crate::models::{CalendarContext, Money, Period, TransactionRecord};
use crate::reports::{self, CategoryShare, CategoryTotals, Series};
use crate::services::filter::{TransactionFilter, TypeFilter};
use crate::services::sort::{self, SortField, SortState};

/// Options chosen in the dashboard controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub type_filter: TypeFilter,
    pub period: Period,
    /// Show income and expense as separate lines
    pub split_by_kind: bool,
}

impl ViewOptions {
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter::new()
            .type_filter(self.type_filter)
            .period(self.period)
    }
}

/// Everything the chart, balance and table widgets render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Records after the type and period filters
    pub records: Vec<TransactionRecord>,
    /// Pie chart data
    pub category_totals: CategoryTotals,
    /// Pie chart labels
    pub shares: Vec<CategoryShare>,
    /// Line chart data
    pub series: Series,
    /// Line chart x-axis
    pub labels: Vec<String>,
    pub balance: Money,
}

impl DashboardView {
    /// Build the view for `records` under `options`
    pub fn compose(
        records: &[TransactionRecord],
        options: &ViewOptions,
        calendar: &CalendarContext,
    ) -> Self {
        let filter = options.filter();
        let filtered = filter.apply(records, calendar);

        let category_totals = reports::by_category(&filtered);
        let shares = category_totals.shares();
        let series = reports::by_series(&filtered, options.period, calendar, options.split_by_kind);
        let labels = reports::series_labels(options.period, calendar);
        let balance = reports::balance_for(&filtered, &filter);

        let unreadable = filtered
            .iter()
            .filter(|r| r.created_at.instant().is_none())
            .count();
        if unreadable > 0 {
            warn!(
                "{} record(s) have unreadable timestamps and are left out of the series",
                unreadable
            );
        }

        debug!(
            "composed dashboard: {} records, {} categories, {} buckets, balance {}",
            filtered.len(),
            category_totals.len(),
            series.len(),
            balance
        );

        Self {
            records: filtered,
            category_totals,
            shares,
            series,
            labels,
            balance,
        }
    }
}

/// The transaction table: canonical rows, display order and sort state
#[derive(Debug, Clone, Default)]
pub struct TableView {
    canonical: Vec<TransactionRecord>,
    rows: Vec<TransactionRecord>,
    sort: Option<SortState>,
}

impl TableView {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            rows: records.clone(),
            canonical: records,
            sort: None,
        }
    }

    /// Replace the data; the display falls back to the canonical order
    pub fn set_records(&mut self, records: Vec<TransactionRecord>) {
        self.rows = records.clone();
        self.canonical = records;
        self.sort = None;
    }

    /// Header click on `field`
    ///
    /// Sorts the rows as currently displayed, so ties keep the previous display
    /// order.
    pub fn toggle(&mut self, field: SortField) -> SortState {
        let state = SortState::toggled(self.sort, field);
        self.rows = sort::sort(&self.rows, state);
        self.sort = Some(state);
        state
    }

    /// Rows in display order
    pub fn rows(&self) -> &[TransactionRecord] {
        &self.rows
    }

    /// Rows in the order they were supplied
    pub fn canonical(&self) -> &[TransactionRecord] {
        &self.canonical
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }
}
