//! Type-safe price representation in integer minor units.
//!
//! Prices are stored as whole cents. Currency formatting is a presentation
//! concern: [`Price`]'s `Display` renders `$1,234.50`, and display strings
//! are only ever parsed at the data boundary (see [`Price::parse_display`]).

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: char = '$';

/// Errors that can occur when parsing a [`Price`] from display text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty (after stripping the currency symbol).
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input does not fit in the minor-unit representation.
    #[error("price is too large")]
    Overflow,
}

/// A non-negative USD price in cents.
///
/// ```
/// use nebula_core::Price;
///
/// let price = Price::from_cents(123_450);
/// assert_eq!(price.to_string(), "$1,234.50");
/// assert_eq!("$1,234.50".parse::<Price>().unwrap(), price);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "u64")]
pub struct Price {
    cents: u64,
}

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self { cents: 0 };

    /// Create a price from an amount in cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Create a price from a whole-dollar amount.
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self {
            cents: dollars.saturating_mul(100),
        }
    }

    /// Amount in cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Amount in dollars as an exact decimal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.cents), 2)
    }

    /// Parse a currency-formatted display string such as `$1,200` or `10.00`.
    ///
    /// A single leading `$` and thousands separators are accepted. Fractions
    /// beyond two decimal places are rounded to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, not a number, or negative.
    pub fn parse_display(text: &str) -> Result<Self, PriceError> {
        let trimmed = text.trim();
        let unsigned = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
        let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

        if digits.trim().is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(digits.trim())
            .map_err(|_| PriceError::Invalid(text.to_string()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }

        let cents = (amount.round_dp(2) * Decimal::ONE_HUNDRED)
            .to_u64()
            .ok_or(PriceError::Overflow)?;

        Ok(Self { cents })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.cents / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "{CURRENCY_SYMBOL}{grouped}.{:02}", self.cents % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_display(s)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(u64::from(quantity)),
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.cents
    }
}

/// Wire representation: cents as a number, or legacy display text.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Cents(u64),
    Text(String),
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        match repr {
            PriceRepr::Cents(cents) => Ok(Self::from_cents(cents)),
            PriceRepr::Text(text) => Self::parse_display(&text),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(0).to_string(), "$0.00");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::from_cents(2550).to_string(), "$25.50");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_dollars(2400).to_string(), "$2,400.00");
        assert_eq!(Price::from_dollars(2_409_102).to_string(), "$2,409,102.00");
        assert_eq!(Price::from_dollars(899).to_string(), "$899.00");
    }

    #[test]
    fn test_parse_display_variants() {
        assert_eq!(Price::parse_display("$10.00").unwrap().cents(), 1000);
        assert_eq!(Price::parse_display("$1,200").unwrap().cents(), 120_000);
        assert_eq!(Price::parse_display("5.5").unwrap().cents(), 550);
        assert_eq!(Price::parse_display(" $890 ").unwrap().cents(), 89_000);
    }

    #[test]
    fn test_parse_display_rounds_to_cents() {
        assert_eq!(Price::parse_display("$1.005").unwrap().cents(), 100);
        assert_eq!(Price::parse_display("$1.006").unwrap().cents(), 101);
    }

    #[test]
    fn test_parse_display_rejects_garbage() {
        assert_eq!(Price::parse_display("$"), Err(PriceError::Empty));
        assert_eq!(Price::parse_display(""), Err(PriceError::Empty));
        assert!(matches!(
            Price::parse_display("ten dollars"),
            Err(PriceError::Invalid(_))
        ));
        assert_eq!(Price::parse_display("-3.00"), Err(PriceError::Negative));
    }

    #[test]
    fn test_amount_is_exact() {
        let price = Price::from_cents(1999);
        assert_eq!(price.amount().to_string(), "19.99");
    }

    #[test]
    fn test_arithmetic() {
        let total: Price = [Price::from_cents(1000) * 2, Price::from_cents(550) * 1]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 2550);
    }

    #[test]
    fn test_deserialize_accepts_cents_or_text() {
        let from_number: Price = serde_json::from_str("2550").unwrap();
        let from_text: Price = serde_json::from_str("\"$25.50\"").unwrap();
        assert_eq!(from_number, from_text);
        assert!(serde_json::from_str::<Price>("\"free\"").is_err());
    }

    #[test]
    fn test_serializes_as_cents() {
        assert_eq!(
            serde_json::to_string(&Price::from_cents(2550)).unwrap(),
            "2550"
        );
    }
}
