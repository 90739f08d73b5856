//! finboard - personal finance dashboard core
//!
//! Filters, aggregates and sorts a user's income and expense records into the
//! data a dashboard shows: a transaction table, category totals with
//! percentage shares, a monthly or daily time series and a balance.
//!
//! # Architecture
//!
//! - `models`: records, money, periods and the calendar context
//! - `services`: the type/period filter and the table sorter
//! - `reports`: category totals, time series and balance
//! - `view`: composition of the above into dashboard and table views
//! - `snapshot`: the in-memory record list and its patches
//! - `session`: auth token and theme, loaded once and passed down
//! - `api`: the backend client and the offline file backend
//! - `config`, `storage`: paths, settings and atomic JSON files
//! - `display`, `export`, `cli`: the terminal front end
//!
//! # Example
//!
//! ```rust
//! use finboard::models::{CalendarContext, CreatedAt, Money, TransactionKind, TransactionRecord};
//! use finboard::view::{DashboardView, ViewOptions};
//!
//! let records = vec![
//!     TransactionRecord::new("1", CreatedAt::new("2024-01-15"), Money::from_cents(10000), TransactionKind::Income),
//!     TransactionRecord::new("2", CreatedAt::new("2024-01-20"), Money::from_cents(3000), TransactionKind::Expense),
//! ];
//! let view = DashboardView::compose(&records, &ViewOptions::default(), &CalendarContext::new(2024));
//! assert_eq!(view.balance, Money::from_cents(7000));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod view;

pub use error::{FinboardError, FinboardResult};
