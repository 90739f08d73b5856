//! CSV export
//!
//! Writes the rows in the order they are displayed. Values are kept
//! machine-readable: the raw timestamp, the amount in currency units with two
//! decimals and the kind as `income`/`expense`.

use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::FinboardResult;
use crate::models::{TransactionKind, TransactionRecord};

const HEADER: [&str; 8] = [
    "id",
    "created_at",
    "description",
    "category",
    "type",
    "amount",
    "origin",
    "payment_method",
];

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

/// Write `rows` as CSV to any writer
pub fn export_transactions_csv<W: Write>(
    rows: &[TransactionRecord],
    writer: W,
) -> FinboardResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for record in rows {
        let amount = format!("{:.2}", record.amount.as_units());
        wtr.write_record([
            record.id.as_str(),
            record.created_at.as_str(),
            record.description.as_deref().unwrap_or_default(),
            record.category.as_deref().unwrap_or_default(),
            kind_label(record.kind),
            amount.as_str(),
            record.origin.as_deref().unwrap_or_default(),
            record.payment_method.as_deref().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `rows` as CSV to a file, replacing it
pub fn export_transactions_csv_file(rows: &[TransactionRecord], path: &Path) -> FinboardResult<()> {
    let file = std::fs::File::create(path)?;
    export_transactions_csv(rows, file)?;
    info!("exported {} rows to {}", rows.len(), path.display());
    Ok(())
}
