//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are held as [`Decimal`] so line totals and subtotals never pick up
//! binary floating point error. The persisted cart stores prices as plain JSON
//! numbers, which is what the mobile client has always written, so the serde
//! representation goes through `rust_decimal::serde::float`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input has more digits than a stored JSON number keeps.
    #[error("price cannot be stored exactly: {0}")]
    Unrepresentable(String),
}

/// A unit price in the store currency's standard unit (e.g., dollars).
///
/// [`Price::parse`] only accepts prices that come back unchanged from the
/// stored JSON number. Deserialization is permissive: prices loaded from
/// storage are trusted as written and are not re-validated, so a stored
/// negative number loads as a negative price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a price from user input such as `"19.90"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number, is negative, or
    /// would not read back unchanged once stored as a JSON number.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let input = s.trim().trim_start_matches('$');
        let amount: Decimal = input
            .parse()
            .map_err(|e: rust_decimal::Error| PriceError::Invalid(e.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if !stores_exactly(amount) {
            return Err(PriceError::Unrepresentable(input.to_string()));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

/// Whether `amount` survives the `f64` round trip of the stored form.
fn stores_exactly(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        .is_some_and(|stored| stored == amount)
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
