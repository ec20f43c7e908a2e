//! Fixed-point numeric types for prices and quantities
//!
//! Wraps `rust_decimal` for deterministic arithmetic (no floating-point
//! errors). Both types carry at most 18 fractional decimal digits, the
//! smallest unit the settlement layer can move. All balance-affecting
//! arithmetic is checked; nothing here silently wraps or rounds.

use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NumericError;

/// Maximum number of fractional decimal digits for [`Price`] and [`Quantity`].
pub const MAX_SCALE: u32 = 18;

/// A non-negative quantity of an asset (balance, order size, or cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity, rejecting negative values and values with more
    /// than [`MAX_SCALE`] fractional digits.
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        check_fixed_point(value)?;
        Ok(Self(value))
    }

    /// Quantity of zero.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Quantity from a whole number of units.
    pub fn from_u64(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Check if the quantity is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Checked addition. Returns `None` on overflow.
    pub fn checked_add(&self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    /// Checked subtraction. Returns `None` if the result would be negative.
    pub fn checked_sub(&self, other: Quantity) -> Option<Quantity> {
        let result = self.0.checked_sub(other.0)?;
        if result.is_sign_negative() {
            return None;
        }
        Some(Quantity(result))
    }

    /// Cost of this quantity at the given price: `self × price`.
    ///
    /// Returns `None` if the product overflows or needs more than
    /// [`MAX_SCALE`] fractional digits to represent exactly.
    pub fn checked_mul(&self, price: Price) -> Option<Quantity> {
        let product = self.0.checked_mul(price.0)?;
        Quantity::try_new(product.normalize()).ok()
    }

    /// The smaller of two quantities.
    pub fn min(self, other: Quantity) -> Quantity {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

impl FromStr for Quantity {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| NumericError::Unparseable {
            input: s.to_string(),
        })?;
        Self::try_new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_new(value).map_err(de::Error::custom)
    }
}

/// A non-negative limit price, denominated in the quote currency per unit
/// of the traded token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative values and values with more than
    /// [`MAX_SCALE`] fractional digits.
    pub fn try_new(value: Decimal) -> Result<Self, NumericError> {
        check_fixed_point(value)?;
        Ok(Self(value))
    }

    /// Price from a whole number of quote units.
    pub fn from_u64(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|_| NumericError::Unparseable {
            input: s.to_string(),
        })?;
        Self::try_new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_new(value).map_err(de::Error::custom)
    }
}

fn check_fixed_point(value: Decimal) -> Result<(), NumericError> {
    if value.is_sign_negative() {
        return Err(NumericError::Negative { value });
    }
    if value.normalize().scale() > MAX_SCALE {
        return Err(NumericError::PrecisionExceeded { value });
    }
    Ok(())
}
