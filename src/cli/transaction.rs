//! Transaction commands: list, summary, add, edit, delete

use std::path::PathBuf;

use clap::Args;

use super::context::{AppContext, SourceArgs};
use crate::display::{format_dashboard, format_transaction_table};
use crate::error::{FinboardError, FinboardResult};
use crate::export::export_transactions_csv_file;
use crate::models::{Money, NewTransaction, Period, TransactionKind, TransactionPatch, MONTH_LABELS};
use crate::services::filter::{TransactionFilter, TypeFilter};
use crate::services::sort::SortField;
use crate::snapshot::TransactionSnapshot;
use crate::view::{DashboardView, TableView, ViewOptions};

/// Type and period filters shared by `list` and `summary`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Show only one kind: all, income, expense
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_filter: Option<String>,

    /// Show one month (1-12 or Jan..Dec) of any year
    #[arg(short, long)]
    pub month: Option<String>,
}

impl FilterArgs {
    pub fn type_filter(&self) -> FinboardResult<TypeFilter> {
        match &self.type_filter {
            Some(s) => s.parse(),
            None => Ok(TypeFilter::All),
        }
    }

    pub fn period(&self) -> FinboardResult<Period> {
        match &self.month {
            Some(s) => parse_month(s).map(Period::month),
            None => Ok(Period::year()),
        }
    }
}

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Month number (1-12), three-letter label or full name to a zero-indexed month
pub fn parse_month(s: &str) -> FinboardResult<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Ok(n - 1);
        }
    }
    let lower = s.to_lowercase();
    MONTH_LABELS
        .iter()
        .zip(MONTH_NAMES)
        .position(|(label, name)| lower == label.to_lowercase() || lower == name)
        .map(|i| i as u32)
        .ok_or_else(|| {
            FinboardError::Validation(format!(
                "Invalid month: '{}'. Use 1-12 or a month name",
                s
            ))
        })
}

fn parse_amount(s: &str) -> FinboardResult<Money> {
    Money::parse(s).map_err(|e| {
        FinboardError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50'. Error: {}",
            s, e
        ))
    })
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Click a column header: date, description, category, amount.
    /// Repeat to click again; the same column twice sorts descending.
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Vec<String>,

    /// Also write the displayed rows to a CSV file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Separate income and expense series
    #[arg(long)]
    pub split: bool,

    /// Print the dashboard data as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// income or expense
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Amount as a positive number (e.g. "12.50")
    #[arg(short, long)]
    pub amount: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(short, long, default_value = "")]
    pub category: String,

    #[arg(long)]
    pub origin: Option<String>,

    #[arg(long)]
    pub payment_method: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Transaction ID
    pub id: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub amount: Option<String>,

    /// income or expense
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Transaction ID
    pub id: String,
}

pub fn handle_list(ctx: &AppContext, args: ListArgs) -> FinboardResult<()> {
    let sort_clicks = args
        .sort
        .iter()
        .map(|s| s.parse::<SortField>())
        .collect::<FinboardResult<Vec<_>>>()?;
    let filter = TransactionFilter::new()
        .type_filter(args.filters.type_filter()?)
        .period(args.filters.period()?);

    let records = ctx.backend(&args.source, false)?.fetch()?;
    let mut table = TableView::new(filter.apply(&records, &ctx.calendar));
    for field in sort_clicks {
        table.toggle(field);
    }

    print!(
        "{}",
        format_transaction_table(table.rows(), table.sort_state(), &ctx.display())
    );

    if let Some(path) = args.output {
        export_transactions_csv_file(table.rows(), &path)?;
        println!("Exported {} row(s) to {}", table.rows().len(), path.display());
    }
    Ok(())
}

pub fn handle_summary(ctx: &AppContext, args: SummaryArgs) -> FinboardResult<()> {
    let options = ViewOptions {
        type_filter: args.filters.type_filter()?,
        period: args.filters.period()?,
        split_by_kind: args.split,
    };

    let records = ctx.backend(&args.source, false)?.fetch()?;
    let view = DashboardView::compose(&records, &options, &ctx.calendar);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_dashboard(&view, &options, &ctx.display()));
    }
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: AddArgs) -> FinboardResult<()> {
    let kind: TransactionKind = args.kind.parse()?;
    let new = NewTransaction {
        description: args.description,
        category: args.category,
        amount: parse_amount(&args.amount)?,
        kind,
        origin: args.origin,
        payment_method: args.payment_method,
    };
    new.validate()?;

    let mut backend = ctx.backend(&args.source, true)?;
    let created = backend.create(&new)?;

    println!("Created transaction: {}", created.id);
    print!(
        "{}",
        format_transaction_table(std::slice::from_ref(&created), None, &ctx.display())
    );
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: EditArgs) -> FinboardResult<()> {
    let desired = TransactionPatch {
        description: args.description,
        category: args.category,
        amount: args.amount.as_deref().map(parse_amount).transpose()?,
        kind: args
            .kind
            .as_deref()
            .map(str::parse::<TransactionKind>)
            .transpose()?,
    };
    desired.validate()?;

    let mut backend = ctx.backend(&args.source, false)?;
    let mut snapshot = TransactionSnapshot::from_records(backend.fetch()?);
    let current = snapshot
        .get(&args.id)
        .ok_or_else(|| FinboardError::transaction_not_found(&args.id))?;

    let patch = TransactionPatch::diff(current, &desired);
    if patch.is_empty() {
        println!("No changes.");
        return Ok(());
    }

    let updated = backend.edit(&args.id, &patch)?;
    snapshot.apply(updated)?;

    println!("Updated transaction: {}", args.id);
    if let Some(record) = snapshot.get(&args.id) {
        print!(
            "{}",
            format_transaction_table(std::slice::from_ref(record), None, &ctx.display())
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> FinboardResult<()> {
    let mut backend = ctx.backend(&args.source, false)?;
    let mut snapshot = TransactionSnapshot::from_records(backend.fetch()?);
    if snapshot.get(&args.id).is_none() {
        return Err(FinboardError::transaction_not_found(&args.id));
    }

    backend.delete(&args.id)?;
    snapshot.remove(&args.id)?;

    println!("Deleted transaction: {}", args.id);
    println!("{} transaction(s) remaining", snapshot.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("1").unwrap(), 0);
        assert_eq!(parse_month("12").unwrap(), 11);
        assert_eq!(parse_month("feb").unwrap(), 1);
        assert_eq!(parse_month("February").unwrap(), 1);
        assert_eq!(parse_month(" Dec ").unwrap(), 11);
        assert!(parse_month("0").unwrap_err().is_validation());
        assert!(parse_month("13").is_err());
        assert!(parse_month("").is_err());
        assert!(parse_month("smarch").is_err());
        assert_eq!(parse_month("SEPTEMBER").unwrap(), 8);
        assert_eq!(parse_month("may").unwrap(), 4);
        assert!(parse_month("Junk").is_err());
        assert!(parse_month("decimal").is_err());
        assert!(parse_month("Sept").is_err());
    }

    #[test]
    fn test_filter_args() {
        let args = FilterArgs {
            type_filter: Some("expense".into()),
            month: Some("3".into()),
        };
        assert_eq!(args.type_filter().unwrap(), TypeFilter::Expense);
        assert_eq!(args.period().unwrap(), Period::month(2));

        let defaults = FilterArgs::default();
        assert_eq!(defaults.type_filter().unwrap(), TypeFilter::All);
        assert_eq!(defaults.period().unwrap(), Period::year());

        let bad = FilterArgs {
            type_filter: Some("transfer".into()),
            month: None,
        };
        assert!(bad.type_filter().is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap().cents(), 1250);
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }
}
