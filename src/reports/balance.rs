//! Balance shown next to the charts
//!
//! With every kind in view the balance nets income against expense. With one
//! kind in view it is the plain sum of that kind's amounts. The rule is looked
//! up in a small table keyed by type scope and period mode so each combination
//! can be checked on its own.

use serde::Serialize;

use crate::models::{Money, PeriodMode, TransactionRecord};
use crate::services::filter::{TransactionFilter, TypeFilter};

/// How a balance is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BalanceRule {
    /// Income minus expense
    Net,
    /// Sum of the amounts of the kind in view
    Sum,
}

/// Whether the type filter shows both kinds or just one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeScope {
    Everything,
    OneKind,
}

impl From<TypeFilter> for TypeScope {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::All => Self::Everything,
            TypeFilter::Income | TypeFilter::Expense => Self::OneKind,
        }
    }
}

/// (type scope, period mode) -> rule
pub const BALANCE_TABLE: [(TypeScope, PeriodMode, BalanceRule); 4] = [
    (TypeScope::Everything, PeriodMode::Year, BalanceRule::Net),
    (TypeScope::Everything, PeriodMode::Month, BalanceRule::Net),
    (TypeScope::OneKind, PeriodMode::Year, BalanceRule::Sum),
    (TypeScope::OneKind, PeriodMode::Month, BalanceRule::Sum),
];

/// Look up the rule for a filter combination
pub fn balance_rule(type_filter: TypeFilter, mode: PeriodMode) -> BalanceRule {
    let scope = TypeScope::from(type_filter);
    BALANCE_TABLE
        .iter()
        .find(|(s, m, _)| *s == scope && *m == mode)
        .map(|(_, _, rule)| *rule)
        .unwrap_or(BalanceRule::Net)
}

/// Apply a rule to records
///
/// Under [`BalanceRule::Sum`] only records admitted by `type_filter` count, so
/// passing an unfiltered list still yields the one-kind total.
pub fn apply_rule(
    records: &[TransactionRecord],
    rule: BalanceRule,
    type_filter: TypeFilter,
) -> Money {
    match rule {
        BalanceRule::Net => records.iter().map(|r| r.signed_amount()).sum(),
        BalanceRule::Sum => records
            .iter()
            .filter(|r| type_filter.admits(r.kind))
            .map(|r| r.amount)
            .sum(),
    }
}

/// Balance of records that were already narrowed by period
pub fn balance(records: &[TransactionRecord], type_filter: TypeFilter) -> Money {
    balance_for(records, &TransactionFilter::new().type_filter(type_filter))
}

/// Balance using the full filter (type and period) to pick the rule
pub fn balance_for(records: &[TransactionRecord], filter: &TransactionFilter) -> Money {
    let rule = balance_rule(filter.type_filter, filter.period.mode);
    apply_rule(records, rule, filter.type_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatedAt, Period, TransactionKind};

    fn rec(cents: i64, kind: TransactionKind) -> TransactionRecord {
        TransactionRecord::new("id", CreatedAt::new("2024-01-15"), Money::from_cents(cents), kind)
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            rec(10000, TransactionKind::Income),
            rec(3000, TransactionKind::Expense),
            rec(500, TransactionKind::Expense),
            rec(250, TransactionKind::Income),
        ]
    }

    #[test]
    fn test_every_table_row() {
        assert_eq!(balance_rule(TypeFilter::All, PeriodMode::Year), BalanceRule::Net);
        assert_eq!(balance_rule(TypeFilter::All, PeriodMode::Month), BalanceRule::Net);
        assert_eq!(balance_rule(TypeFilter::Income, PeriodMode::Year), BalanceRule::Sum);
        assert_eq!(balance_rule(TypeFilter::Income, PeriodMode::Month), BalanceRule::Sum);
        assert_eq!(balance_rule(TypeFilter::Expense, PeriodMode::Year), BalanceRule::Sum);
        assert_eq!(balance_rule(TypeFilter::Expense, PeriodMode::Month), BalanceRule::Sum);
    }

    #[test]
    fn test_all_nets_income_against_expense() {
        assert_eq!(balance(&sample(), TypeFilter::All).cents(), 10250 - 3500);
    }

    #[test]
    fn test_one_kind_is_a_plain_sum() {
        assert_eq!(balance(&sample(), TypeFilter::Income).cents(), 10250);
        assert_eq!(balance(&sample(), TypeFilter::Expense).cents(), 3500);
    }

    #[test]
    fn test_salary_and_food_nets_to_seventy() {
        let records = vec![rec(10000, TransactionKind::Income), rec(3000, TransactionKind::Expense)];
        assert_eq!(balance(&records, TypeFilter::All).cents(), 7000);
    }

    #[test]
    fn test_net_can_go_negative() {
        let records = vec![rec(100, TransactionKind::Income), rec(300, TransactionKind::Expense)];
        assert_eq!(balance(&records, TypeFilter::All).cents(), -200);
    }

    #[test]
    fn test_empty_is_zero() {
        for filter in [TypeFilter::All, TypeFilter::Income, TypeFilter::Expense] {
            assert!(balance(&[], filter).is_zero());
        }
    }

    #[test]
    fn test_balance_for_month_filter() {
        let filter = TransactionFilter::new()
            .type_filter(TypeFilter::Expense)
            .period(Period::month(0));
        assert_eq!(balance_for(&sample(), &filter).cents(), 3500);
    }
}
