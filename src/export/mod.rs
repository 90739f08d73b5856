//! Export of the transaction table

pub mod csv;

pub use self::csv::{export_transactions_csv, export_transactions_csv_file};
