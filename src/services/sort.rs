//! Table sorting
//!
//! Produces a stably ordered copy of a record list. The input is never
//! reordered; the canonical list stays as the backend delivered it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::FinboardError;
use crate::models::TransactionRecord;

/// Sortable column of the transaction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    Description,
    Category,
    Amount,
}

impl SortField {
    /// All columns in table order
    pub const ALL: [SortField; 4] = [
        SortField::CreatedAt,
        SortField::Description,
        SortField::Category,
        SortField::Amount,
    ];

    /// Column header
    pub fn header(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Date",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Amount => "Amount",
        }
    }

    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" | "createdat" | "created_at" | "created-at" => Some(Self::CreatedAt),
            "description" | "desc" | "descricao" => Some(Self::Description),
            "category" | "categoria" => Some(Self::Category),
            "amount" | "valor" | "value" => Some(Self::Amount),
            _ => None,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl FromStr for SortField {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            FinboardError::Validation(format!(
                "Invalid sort field: '{}'. Valid fields: date, description, category, amount",
                s
            ))
        })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Arrow shown next to the active column
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// The active column and direction of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// State after a click on `field`'s header
    ///
    /// Clicking the column that is sorted ascending flips it to descending;
    /// anything else starts ascending.
    pub fn toggled(previous: Option<SortState>, field: SortField) -> SortState {
        match previous {
            Some(prev) if prev.field == field && prev.direction == SortDirection::Asc => {
                Self::descending(field)
            }
            _ => Self::ascending(field),
        }
    }

    /// Indicator to render next to `field`'s header, if it is the active column
    pub fn indicator_for(&self, field: SortField) -> Option<&'static str> {
        (self.field == field).then(|| self.direction.indicator())
    }
}

/// Text collation: case-insensitive, lowercase before uppercase on ties
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ascending comparison of two records on one field
///
/// Missing text sorts as the empty string. Timestamps compare by instant;
/// unreadable ones sort before every readable one.
pub fn compare(a: &TransactionRecord, b: &TransactionRecord, field: SortField) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.instant().cmp(&b.created_at.instant()),
        SortField::Description => collate(
            a.description.as_deref().unwrap_or(""),
            b.description.as_deref().unwrap_or(""),
        ),
        SortField::Category => collate(
            a.category.as_deref().unwrap_or(""),
            b.category.as_deref().unwrap_or(""),
        ),
        SortField::Amount => a.amount.cmp(&b.amount),
    }
}

/// Return a copy of `records` ordered by `state`; equal keys keep their order
pub fn sort(records: &[TransactionRecord], state: SortState) -> Vec<TransactionRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, state.field);
        match state.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatedAt, Money, TransactionKind};

    fn rec(id: &str, created_at: &str, cents: i64) -> TransactionRecord {
        TransactionRecord::new(
            id,
            CreatedAt::new(created_at),
            Money::from_cents(cents),
            TransactionKind::Expense,
        )
    }

    fn ids(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_amount() {
        let records = vec![
            rec("a", "2024-01-01", 500),
            rec("b", "2024-01-02", 100),
            rec("c", "2024-01-03", 300),
        ];
        let asc = sort(&records, SortState::ascending(SortField::Amount));
        assert_eq!(ids(&asc), vec!["b", "c", "a"]);

        let desc = sort(&records, SortState::descending(SortField::Amount));
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);

        // input untouched
        assert_eq!(ids(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_instant_not_text() {
        let records = vec![
            rec("late", "2024-01-10T12:00:00Z", 1),
            rec("early", "2024-01-10T10:00:00-03:00", 1),
            rec("first", "2024-01-09", 1),
        ];
        // 10:00-03:00 is 13:00Z, after 12:00Z, though it is smaller as text
        let asc = sort(&records, SortState::ascending(SortField::CreatedAt));
        assert_eq!(ids(&asc), vec!["first", "late", "early"]);
    }

    #[test]
    fn test_unreadable_timestamps_sort_first() {
        let records = vec![rec("ok", "2024-01-01", 1), rec("bad", "??", 1)];
        let asc = sort(&records, SortState::ascending(SortField::CreatedAt));
        assert_eq!(ids(&asc), vec!["bad", "ok"]);
    }

    #[test]
    fn test_missing_text_sorts_as_empty() {
        let records = vec![
            rec("food", "2024-01-01", 1).with_category("food"),
            rec("none", "2024-01-01", 1),
            rec("Bills", "2024-01-01", 1).with_category("Bills"),
        ];
        let asc = sort(&records, SortState::ascending(SortField::Category));
        assert_eq!(ids(&asc), vec!["none", "Bills", "food"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            rec("x", "2024-01-01", 100),
            rec("y", "2024-01-02", 100),
            rec("z", "2024-01-03", 100),
        ];
        let asc = sort(&records, SortState::ascending(SortField::Amount));
        assert_eq!(ids(&asc), vec!["x", "y", "z"]);
        let desc = sort(&records, SortState::descending(SortField::Amount));
        assert_eq!(ids(&desc), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let records = vec![
            rec("a", "2024-01-01", 300).with_description("b"),
            rec("b", "2024-01-02", 100).with_description("a"),
            rec("c", "2024-01-03", 200).with_description("A"),
        ];
        let state = SortState::ascending(SortField::Description);
        let once = sort(&records, state);
        let twice = sort(&once, state);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_toggle_rules() {
        let first = SortState::toggled(None, SortField::Amount);
        assert_eq!(first, SortState::ascending(SortField::Amount));

        let second = SortState::toggled(Some(first), SortField::Amount);
        assert_eq!(second, SortState::descending(SortField::Amount));

        let third = SortState::toggled(Some(second), SortField::Amount);
        assert_eq!(third, SortState::ascending(SortField::Amount));

        let other = SortState::toggled(Some(second), SortField::Category);
        assert_eq!(other, SortState::ascending(SortField::Category));
    }

    #[test]
    fn test_double_toggle_restores_ascending_order() {
        let records = vec![
            rec("a", "2024-01-01", 300),
            rec("b", "2024-01-02", 100),
            rec("c", "2024-01-03", 200),
        ];
        let s1 = SortState::toggled(None, SortField::Amount);
        let asc = sort(&records, s1);
        let s2 = SortState::toggled(Some(s1), SortField::Amount);
        let desc = sort(&asc, s2);
        let s3 = SortState::toggled(Some(s2), SortField::Amount);
        let back = sort(&desc, s3);
        assert_eq!(ids(&back), ids(&asc));
    }

    #[test]
    fn test_indicator() {
        let state = SortState::descending(SortField::Amount);
        assert_eq!(state.indicator_for(SortField::Amount), Some("↓"));
        assert_eq!(state.indicator_for(SortField::Category), None);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("date".parse::<SortField>().unwrap(), SortField::CreatedAt);
        assert_eq!("Amount".parse::<SortField>().unwrap(), SortField::Amount);
        assert!("payee".parse::<SortField>().is_err());
    }
}
