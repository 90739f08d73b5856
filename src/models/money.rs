//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that category totals, series
//! buckets and balances add up exactly. The backend speaks JSON numbers in
//! currency units; see [`units`] for the wire conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg};
use thiserror::Error;

/// Largest magnitude accepted from user input or the wire, in cents
///
/// Ten trillion currency units. Totals beyond it still saturate instead of
/// wrapping.
pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Addition saturates at the bounds of `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finboard::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Convert a decimal amount in currency units, rounding to the nearest cent
    ///
    /// Returns `None` for NaN, infinities and magnitudes above [`MAX_CENTS`].
    ///
    /// # Examples
    /// ```
    /// use finboard::models::Money;
    /// assert_eq!(Money::try_from_units(100.5).map(|m| m.cents()), Some(10050));
    /// assert_eq!(Money::try_from_units(0.1 + 0.2).map(|m| m.cents()), Some(30));
    /// assert_eq!(Money::try_from_units(1e17), None);
    /// ```
    pub fn try_from_units(units: f64) -> Option<Self> {
        let cents = (units * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_CENTS as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// The amount in currency units
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts "12", "12.5", "12.50", "$12.50" and a leading "-". Digits past
    /// the second decimal place are dropped.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (whole, fraction) = rest.split_once('.').unwrap_or((rest, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        // ASCII digits only from here, so byte slicing is safe
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => i64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction[..2].parse::<i64>().map_err(|_| invalid())?,
        };
        let cents = whole
            .parse::<i64>()
            .ok()
            .and_then(|units| units.checked_mul(100))
            .and_then(|cents| cents.checked_add(fraction_cents))
            .filter(|cents| *cents <= MAX_CENTS)
            .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, magnitude / 100, magnitude % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Serde adapter for amounts written as decimal currency units (`"valor": 100.5`)
pub mod units {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.as_units())
    }

    /// Backends that store decimals sometimes send them as strings
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Units {
        Number(f64),
        Text(String),
    }

    impl Units {
        pub(super) fn into_money<E: serde::de::Error>(self) -> Result<Money, E> {
            let value = match &self {
                Units::Number(n) => *n,
                Units::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("invalid amount '{}'", s)))?,
            };
            Money::try_from_units(value)
                .ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        Units::deserialize(deserializer)?.into_money()
    }

    /// Same conversion for optional fields
    pub mod option {
        use super::super::Money;
        use super::Units;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.as_units()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Option::<Units>::deserialize(deserializer)?
                .map(Units::into_money)
                .transpose()
        }
    }
}

/// Why a typed amount was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Wire {
        #[serde(with = "units")]
        valor: Money,
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("R$"), "-R$0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse("0.059").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "abc", ".50", "1.2.3", "1.x", "+5", "--5", "1 000"] {
            assert!(
                matches!(Money::parse(input), Err(MoneyParseError::InvalidFormat(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_non_ascii_fraction_is_an_error() {
        assert!(matches!(
            Money::parse("1.aé"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(Money::parse("1.é").is_err());
        assert!(Money::parse("1.5é").is_err());
        assert!(Money::parse("١٢.٥٠").is_err());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("10000000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert_eq!(
            Money::parse("10000000000000").unwrap().cents(),
            MAX_CENTS
        );
    }

    #[test]
    fn test_sum_saturates() {
        let amounts = vec![Money::from_cents(100), Money::from_cents(200), Money::from_cents(300)];
        assert_eq!(amounts.into_iter().sum::<Money>().cents(), 600);

        let huge = vec![Money::from_cents(i64::MAX), Money::from_cents(i64::MAX)];
        assert_eq!(huge.into_iter().sum::<Money>().cents(), i64::MAX);

        let mut total = Money::from_cents(i64::MIN);
        total += -Money::from_cents(i64::MIN);
        assert_eq!(total.cents(), -1);
    }

    #[test]
    fn test_try_from_units() {
        assert_eq!(Money::try_from_units(10.5), Some(Money::from_cents(1050)));
        assert_eq!(Money::try_from_units(19.99), Some(Money::from_cents(1999)));
        assert_eq!(Money::try_from_units(f64::NAN), None);
        assert_eq!(Money::try_from_units(f64::INFINITY), None);
        assert_eq!(Money::try_from_units(-1e17), None);
        assert_eq!(Money::from_cents(1050).as_units(), 10.5);
    }

    #[test]
    fn test_units_serde_adapter() {
        let wire: Wire = serde_json::from_str(r#"{"valor": 42.75}"#).unwrap();
        assert_eq!(wire.valor.cents(), 4275);
        assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"valor":42.75}"#);

        let whole: Wire = serde_json::from_str(r#"{"valor": 100}"#).unwrap();
        assert_eq!(whole.valor.cents(), 10000);

        let text: Wire = serde_json::from_str(r#"{"valor": "19.90"}"#).unwrap();
        assert_eq!(text.valor.cents(), 1990);

        assert!(serde_json::from_str::<Wire>(r#"{"valor": "abc"}"#).is_err());
    }

    #[test]
    fn test_oversized_wire_amount_is_rejected() {
        let err = serde_json::from_str::<Wire>(r#"{"valor": 1e17}"#).unwrap_err();
        assert!(err.to_string().contains("amount out of range"));

        assert!(serde_json::from_str::<Wire>(r#"{"valor": "-1e17"}"#).is_err());
        assert!(serde_json::from_str::<Wire>(r#"{"valor": "NaN"}"#).is_err());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), m);
    }
}
