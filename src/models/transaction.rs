//! Transaction model
//!
//! A transaction record is a single income or expense event as the backend
//! stores it. Amounts are always non-negative magnitudes; the direction comes
//! from [`TransactionKind`].
//!
//! Field names on the wire follow the backend (`descricao`, `categoria`,
//! `valor`, `tipo`, ...). The English names are accepted when reading so that
//! hand-written record files stay readable.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::{units, Money};
use crate::error::{FinboardError, FinboardResult};

/// Bucket used for records without a category
pub const OTHER_CATEGORY: &str = "Other";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "entrada", alias = "income")]
    Income,
    #[serde(rename = "saida", alias = "expense")]
    Expense,
}

impl TransactionKind {
    /// Both kinds, income first
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    /// Parse from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "entrada" => Some(Self::Income),
            "expense" | "out" | "saida" | "saída" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            FinboardError::Validation(format!(
                "Invalid transaction type: '{}'. Valid types: income, expense",
                s
            ))
        })
    }
}

/// Creation timestamp as sent by the backend
///
/// The raw text is kept verbatim and parsed on demand. A value that cannot be
/// parsed is not an error: it simply has no instant, matches no month and lands
/// in no series bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedAt(String);

impl CreatedAt {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant this timestamp denotes, reading zone-less date-times as UTC
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant_at(&Utc.fix())
    }

    /// The instant this timestamp denotes, if it can be read
    ///
    /// Accepts RFC 3339, naive date-times (wall-clock time at `offset`) and
    /// plain dates (midnight UTC).
    pub fn instant_at(&self, offset: &FixedOffset) -> Option<DateTime<Utc>> {
        let raw = self.0.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return offset
                    .from_local_datetime(&naive)
                    .single()
                    .map(|local| local.with_timezone(&Utc));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Calendar date of this timestamp at the given offset
    pub fn date_at(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        self.instant_at(offset)
            .map(|instant| instant.with_timezone(offset).date_naive())
    }

    /// Zero-indexed month (0 = January) at the given offset
    pub fn month0_at(&self, offset: &FixedOffset) -> Option<u32> {
        self.date_at(offset).map(|d| d.month0())
    }

    /// Day of month (1-31) at the given offset
    pub fn day_at(&self, offset: &FixedOffset) -> Option<u32> {
        self.date_at(offset).map(|d| d.day())
    }
}

impl From<DateTime<Utc>> for CreatedAt {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifiers arrive as JSON strings or numbers; both are kept as text
pub mod wire_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        })
    }
}

/// A single income/expense transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Backend-assigned identifier
    #[serde(deserialize_with = "wire_id::deserialize")]
    pub id: String,

    /// When the backend created the record
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: CreatedAt,

    #[serde(rename = "descricao", alias = "description", default)]
    pub description: Option<String>,

    #[serde(rename = "categoria", alias = "category", default)]
    pub category: Option<String>,

    /// Non-negative magnitude
    #[serde(rename = "valor", alias = "amount", with = "units")]
    pub amount: Money,

    #[serde(rename = "tipo", alias = "kind")]
    pub kind: TransactionKind,

    #[serde(
        rename = "origem",
        alias = "origin",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,

    #[serde(
        rename = "metodoPagamento",
        alias = "paymentMethod",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
}

impl TransactionRecord {
    /// Create a record with the required fields
    pub fn new(
        id: impl Into<String>,
        created_at: CreatedAt,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            description: None,
            category: None,
            amount,
            kind,
            origin: None,
            payment_method: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The aggregation bucket of this record: its category, or "Other"
    ///
    /// An empty category counts as absent.
    pub fn category_bucket(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => OTHER_CATEGORY,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Payload for creating a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "categoria")]
    pub category: String,

    #[serde(rename = "valor", with = "units")]
    pub amount: Money,

    #[serde(rename = "tipo")]
    pub kind: TransactionKind,

    #[serde(rename = "origem", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(
        rename = "metodoPagamento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount: Money) -> Self {
        Self {
            description: String::new(),
            category: String::new(),
            amount,
            kind,
            origin: None,
            payment_method: None,
        }
    }

    /// Validate the payload before it is sent anywhere
    pub fn validate(&self) -> FinboardResult<()> {
        if self.amount.is_negative() {
            return Err(FinboardError::Validation(format!(
                "Amount must not be negative (got {}); use the type to record an expense",
                self.amount
            )));
        }
        Ok(())
    }

    /// Turn the payload into a stored record (used when no backend assigns ids)
    pub fn into_record(self, id: impl Into<String>, created_at: CreatedAt) -> TransactionRecord {
        TransactionRecord {
            id: id.into(),
            created_at,
            description: non_empty(self.description),
            category: non_empty(self.category),
            amount: self.amount,
            kind: self.kind,
            origin: self.origin,
            payment_method: self.payment_method,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Partial update for an existing transaction
///
/// Only fields that are `Some` are sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(
        rename = "valor",
        default,
        with = "units::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Money>,

    #[serde(rename = "tipo", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
}

impl TransactionPatch {
    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
    }

    /// Keep only the fields of `desired` that differ from `current`
    pub fn diff(current: &TransactionRecord, desired: &TransactionPatch) -> TransactionPatch {
        TransactionPatch {
            description: desired
                .description
                .clone()
                .filter(|d| current.description.as_deref() != Some(d.as_str())),
            category: desired
                .category
                .clone()
                .filter(|c| current.category.as_deref() != Some(c.as_str())),
            amount: desired.amount.filter(|a| *a != current.amount),
            kind: desired.kind.filter(|k| *k != current.kind),
        }
    }

    pub fn validate(&self) -> FinboardResult<()> {
        if let Some(amount) = self.amount {
            if amount.is_negative() {
                return Err(FinboardError::Validation(format!(
                    "Amount must not be negative (got {})",
                    amount
                )));
            }
        }
        Ok(())
    }

    /// Apply the patch to a record in place
    pub fn apply_to(&self, record: &mut TransactionRecord) {
        if let Some(ref description) = self.description {
            record.description = Some(description.clone());
        }
        if let Some(ref category) = self.category {
            record.category = Some(category.clone());
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
    }
}
