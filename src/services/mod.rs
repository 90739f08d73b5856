//! Service layer for finboard
//!
//! Record list transformations used by the views: narrowing by kind and period,
//! and ordering for the table.

pub mod filter;
pub mod sort;

pub use filter::{filter, TransactionFilter, TypeFilter};
pub use sort::{sort, SortDirection, SortField, SortState};
