//! Dashboard summary: balance, category shares and the time series

use super::{truncate, DisplayOptions};
use crate::reports::Series;
use crate::view::{DashboardView, ViewOptions};

/// Render a composed dashboard as plain text
pub fn format_dashboard(
    view: &DashboardView,
    options: &ViewOptions,
    display: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Dashboard: {} / {}\n",
        options.period, options.type_filter
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Balance: {}\n", display.money(view.balance)));
    output.push_str(&format!("Transactions: {}\n\n", view.records.len()));

    output.push_str(&format!("{:<35} {:>14} {:>8}\n", "Category", "Amount", "%"));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    if view.shares.is_empty() {
        output.push_str("  (no data)\n");
    }
    for share in &view.shares {
        output.push_str(&format!(
            "{:<35} {:>14} {:>7.1}%\n",
            truncate(&share.label, 35),
            display.money(share.value),
            share.percentage
        ));
    }

    output.push('\n');
    match &view.series {
        Series::Combined(values) => {
            output.push_str(&format!("{:<8} {:>14}\n", "Period", "Total"));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (label, value) in view.labels.iter().zip(values) {
                output.push_str(&format!("{:<8} {:>14}\n", label, display.money(*value)));
            }
        }
        Series::ByKind { income, expense } => {
            output.push_str(&format!(
                "{:<8} {:>14} {:>14}\n",
                "Period", "Income", "Expense"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for ((label, inc), exp) in view.labels.iter().zip(income).zip(expense) {
                output.push_str(&format!(
                    "{:<8} {:>14} {:>14}\n",
                    label,
                    display.money(*inc),
                    display.money(*exp)
                ));
            }
        }
    }

    output
}
