//! Reports module for finboard
//!
//! Aggregations behind the dashboard widgets: category totals and their
//! percentage shares (pie chart), monthly or daily series (line chart), and
//! the balance figure.

pub mod balance;
pub mod category;
pub mod series;

pub use balance::{balance, balance_for, balance_rule, BalanceRule};
pub use category::{
    by_category, category_shares, share_percent, CategoryShare, CategoryTotal, CategoryTotals,
};
pub use series::{by_series, series_labels, Series};
