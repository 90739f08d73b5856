//! Transaction table
//!
//! Column headers of sortable fields carry the arrow of the active sort.

use tabled::builder::Builder;
use tabled::settings::Style;

use super::{truncate, DisplayOptions};
use crate::models::TransactionRecord;
use crate::services::sort::{SortField, SortState};

const DESCRIPTION_WIDTH: usize = 32;

/// Header row; the active sort column gets its arrow
pub fn table_headers(sort: Option<SortState>) -> Vec<String> {
    let header = |field: SortField| match sort.and_then(|s| s.indicator_for(field)) {
        Some(arrow) => format!("{} {}", field.header(), arrow),
        None => field.header().to_string(),
    };
    vec![
        "ID".to_string(),
        header(SortField::CreatedAt),
        header(SortField::Description),
        header(SortField::Category),
        "Type".to_string(),
        header(SortField::Amount),
    ]
}

/// One record as display cells, in header order
pub fn table_row(record: &TransactionRecord, options: &DisplayOptions) -> Vec<String> {
    vec![
        record.id.clone(),
        options.date(&record.created_at),
        record.description.clone().unwrap_or_default(),
        record.category.clone().unwrap_or_default(),
        record.kind.to_string(),
        options.money(record.amount),
    ]
}

/// Render rows, in the order given, as a terminal table
pub fn format_transaction_table(
    rows: &[TransactionRecord],
    sort: Option<SortState>,
    options: &DisplayOptions,
) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table_headers(sort));
    for record in rows {
        let mut cells = table_row(record, options);
        cells[2] = truncate(&cells[2], DESCRIPTION_WIDTH);
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    format!("{}\n{} transaction(s)\n", table, rows.len())
}
