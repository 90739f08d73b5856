//! Core data models for finboard
//!
//! The transaction record as the backend ships it, the money type used for
//! every total, and the reporting period selection.

pub mod money;
pub mod period;
pub mod transaction;

pub use money::Money;
pub use period::{days_in_month, CalendarContext, Period, PeriodMode, MONTH_LABELS};
pub use transaction::{
    CreatedAt, NewTransaction, TransactionKind, TransactionPatch, TransactionRecord,
    OTHER_CATEGORY,
};
