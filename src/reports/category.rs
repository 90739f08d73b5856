//! Category totals
//!
//! Sums record amounts per category for the pie chart, and turns those totals
//! into percentage shares for the chart labels.
//!
//! The sums are raw magnitudes: income and expense amounts are added together
//! unless the caller filters by kind first. The signed view lives in
//! [`crate::reports::balance`].

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Money, TransactionRecord};

/// Total for one category bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub value: Money,
}

/// Category total with its share of the grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub value: Money,
    /// Percentage of the grand total, rounded to one decimal place
    pub percentage: f64,
}

/// Per-category totals, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals(Vec<CategoryTotal>);

impl CategoryTotals {
    /// Look up the total of one category
    pub fn get(&self, label: &str) -> Option<Money> {
        self.0.iter().find(|t| t.label == label).map(|t| t.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all category totals
    pub fn grand_total(&self) -> Money {
        self.0.iter().map(|t| t.value).sum()
    }

    /// Percentage share of every category
    pub fn shares(&self) -> Vec<CategoryShare> {
        let grand_total = self.grand_total();
        self.0
            .iter()
            .map(|t| CategoryShare {
                label: t.label.clone(),
                value: t.value,
                percentage: share_percent(t.value, grand_total),
            })
            .collect()
    }

    pub fn into_vec(self) -> Vec<CategoryTotal> {
        self.0
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Sum `amount` per category bucket; records without a category go to "Other"
pub fn by_category(records: &[TransactionRecord]) -> CategoryTotals {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let label = record.category_bucket();
        match index.get(label) {
            Some(&i) => totals[i].value += record.amount,
            None => {
                index.insert(label, totals.len());
                totals.push(CategoryTotal {
                    label: label.to_string(),
                    value: record.amount,
                });
            }
        }
    }

    CategoryTotals(totals)
}

/// Share of `value` in `grand_total` as a percentage with one decimal
///
/// A zero grand total gives a zero share.
pub fn share_percent(value: Money, grand_total: Money) -> f64 {
    if grand_total.is_zero() {
        return 0.0;
    }
    let raw = value.cents() as f64 / grand_total.cents() as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Percentage shares of a set of category totals
pub fn category_shares(totals: &CategoryTotals) -> Vec<CategoryShare> {
    totals.shares()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatedAt, TransactionKind};

    fn rec(category: Option<&str>, cents: i64, kind: TransactionKind) -> TransactionRecord {
        let r = TransactionRecord::new(
            "id",
            CreatedAt::new("2024-01-15"),
            Money::from_cents(cents),
            kind,
        );
        match category {
            Some(c) => r.with_category(c),
            None => r,
        }
    }

    #[test]
    fn test_by_category_example() {
        let records = vec![
            rec(Some("Salary"), 10000, TransactionKind::Income),
            rec(Some("Food"), 3000, TransactionKind::Expense),
        ];
        let totals = by_category(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Salary"), Some(Money::from_cents(10000)));
        assert_eq!(totals.get("Food"), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_missing_category_goes_to_other() {
        let totals = by_category(&[rec(None, 1000, TransactionKind::Expense)]);
        assert_eq!(totals.get("Other"), Some(Money::from_cents(1000)));
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_sums_ignore_kind() {
        let records = vec![
            rec(Some("Mixed"), 500, TransactionKind::Income),
            rec(Some("Mixed"), 200, TransactionKind::Expense),
        ];
        assert_eq!(by_category(&records).get("Mixed"), Some(Money::from_cents(700)));
    }

    #[test]
    fn test_grand_total_equals_sum_of_amounts() {
        let records = vec![
            rec(Some("A"), 123, TransactionKind::Income),
            rec(None, 456, TransactionKind::Expense),
            rec(Some("A"), 789, TransactionKind::Expense),
            rec(Some("B"), 1, TransactionKind::Income),
        ];
        let expected: Money = records.iter().map(|r| r.amount).sum();
        assert_eq!(by_category(&records).grand_total(), expected);
    }

    #[test]
    fn test_first_appearance_order() {
        let records = vec![
            rec(Some("Zeta"), 1, TransactionKind::Expense),
            rec(Some("Alpha"), 1, TransactionKind::Expense),
            rec(Some("Zeta"), 1, TransactionKind::Expense),
        ];
        let labels: Vec<_> = by_category(&records)
            .iter()
            .map(|t| t.label.clone())
            .collect();
        assert_eq!(labels, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_empty_input() {
        let totals = by_category(&[]);
        assert!(totals.is_empty());
        assert!(totals.grand_total().is_zero());
        assert!(category_shares(&totals).is_empty());
    }

    #[test]
    fn test_shares_round_to_one_decimal() {
        let records = vec![
            rec(Some("A"), 100, TransactionKind::Expense),
            rec(Some("B"), 200, TransactionKind::Expense),
        ];
        let shares = category_shares(&by_category(&records));
        assert_eq!(shares[0].percentage, 33.3);
        assert_eq!(shares[1].percentage, 66.7);
    }

    #[test]
    fn test_zero_grand_total_gives_zero_shares() {
        let records = vec![
            rec(Some("A"), 0, TransactionKind::Expense),
            rec(Some("B"), 0, TransactionKind::Expense),
        ];
        let shares = category_shares(&by_category(&records));
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.percentage == 0.0));
        assert!(shares.iter().all(|s| !s.percentage.is_nan()));
        assert_eq!(share_percent(Money::from_cents(5), Money::zero()), 0.0);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let records = vec![
            rec(Some("A"), i64::MAX, TransactionKind::Expense),
            rec(Some("A"), i64::MAX, TransactionKind::Expense),
            rec(Some("B"), i64::MAX, TransactionKind::Expense),
        ];
        let totals = by_category(&records);
        assert_eq!(totals.get("A"), Some(Money::from_cents(i64::MAX)));
        assert_eq!(totals.grand_total(), Money::from_cents(i64::MAX));
    }
}
