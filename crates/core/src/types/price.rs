//! Non-negative BRL prices with Brazilian display formatting.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors produced when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("price cannot be empty")]
    Empty,
    #[error("price is not a number: {0}")]
    Invalid(String),
    #[error("price cannot be negative")]
    Negative,
}

/// A product price in Brazilian reais.
///
/// Always holds a non-negative amount rounded to centavos. `Display` renders
/// the storefront format: `R$ `, `.` between thousands, `,` before the two
/// decimal digits.
///
/// ```
/// use rust_decimal::Decimal;
/// use tudobacana_core::Price;
///
/// let price = Price::new(Decimal::new(8990, 2)).unwrap();
/// assert_eq!(price.to_string(), "R$ 89,90");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Build a price from a decimal amount, rounding half away from zero to
    /// two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        Ok(Self(
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ))
    }

    /// Parse user input such as `89.9`, `89,90` or `1.234,50`.
    ///
    /// When both separators appear the comma is taken as the decimal mark.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] for blank, non-numeric, or negative input.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let normalized = if trimmed.contains(',') {
            trimmed.replace('.', "").replace(',', ".")
        } else {
            trimmed.to_owned()
        };

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;
        Self::new(amount)
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = format!("{:.2}", self.0);
        let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let digits: Vec<char> = units.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(*digit);
        }

        write!(f, "R$ {grouped},{cents}")
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn brl(input: &str) -> String {
        Price::parse(input).unwrap().to_string()
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(brl("89.9"), "R$ 89,90");
        assert_eq!(brl("125.5"), "R$ 125,50");
        assert_eq!(brl("145"), "R$ 145,00");
        assert_eq!(brl("0"), "R$ 0,00");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(brl("1234.5"), "R$ 1.234,50");
        assert_eq!(brl("999"), "R$ 999,00");
        assert_eq!(brl("1000"), "R$ 1.000,00");
        assert_eq!(brl("1234567.891"), "R$ 1.234.567,89");
    }

    #[test]
    fn test_parse_accepts_comma_decimal() {
        assert_eq!(brl("89,90"), "R$ 89,90");
        assert_eq!(brl("1.234,50"), "R$ 1.234,50");
        assert_eq!(brl(" 65 "), "R$ 65,00");
    }

    #[test]
    fn test_parse_rounds_half_up() {
        assert_eq!(brl("10.005"), "R$ 10,01");
        assert_eq!(brl("10.004"), "R$ 10,00");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_negative_zero_is_allowed() {
        assert_eq!(brl("-0"), "R$ 0,00");
    }

    #[test]
    fn test_serde_rejects_negative() {
        assert!(serde_json::from_str::<Price>("\"-3.00\"").is_err());
        let price: Price = serde_json::from_str("\"89.90\"").unwrap();
        assert_eq!(price, Price::parse("89.9").unwrap());
    }
}
