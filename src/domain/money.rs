//! Money types
//!
//! Domain primitives for monetary values. Request amounts arrive as decimal
//! major units and are validated at construction time; all stored balances
//! and arithmetic use integer minor units (cents), so balance math is exact.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum allowed amount (1 trillion major units)
const MAX_AMOUNT: &str = "1000000000000";

/// Maximum decimal places (2, one cent resolution)
const MAX_SCALE: u32 = 2;

/// Amount represents a validated monetary input in major units.
///
/// # Invariants
/// - Value is always positive (>= 0.01)
/// - Maximum 2 decimal places
/// - Maximum value is 1 trillion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be at least 0.01 (got {0})")]
    NotPositive(Decimal),

    #[error("Amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount exceeds maximum allowed value ({MAX_AMOUNT})")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    /// - `AmountError::TooManyDecimals` if more than 2 decimal places
    /// - `AmountError::Overflow` if value > 1 trillion
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }

        if value.normalize().scale() > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(value.normalize().scale()));
        }

        let max = Decimal::from_str(MAX_AMOUNT).expect("Invalid MAX_AMOUNT constant");
        if value > max {
            return Err(AmountError::Overflow);
        }

        Ok(Self(value))
    }

    /// Get the underlying Decimal value in major units.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Convert to integer minor units.
    ///
    /// Multiplies by 100 and rounds half-away-from-zero. Callers must
    /// convert exactly once per request so rounding never compounds.
    pub fn minor_units(&self) -> MinorUnits {
        let cents = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // Scale is 0 after rounding and the magnitude is capped, so the
        // mantissa is the cent count and fits in i64.
        MinorUnits::new(cents.mantissa() as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s)
            .map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        format!("{:.2}", amount.0)
    }
}

/// MinorUnits is an integer count of the smallest currency unit.
///
/// Balances and transaction magnitudes are stored in this form. Unlike
/// `Amount`, a MinorUnits value can be zero or negative (a negative value
/// only ever exists transiently as a delta, never as a persisted balance).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub const ZERO: Self = Self(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw integer cent count.
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checked addition, None on i64 overflow.
    pub fn checked_add(&self, other: MinorUnits) -> Option<MinorUnits> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction, None on i64 overflow.
    pub fn checked_sub(&self, other: MinorUnits) -> Option<MinorUnits> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Check if this balance covers a withdrawal of `amount`.
    pub fn is_sufficient_for(&self, amount: MinorUnits) -> bool {
        self.0 >= amount.0
    }

    /// Convert back to decimal major units (exact, minor count / 100).
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MAX_SCALE)
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::ops::Neg for MinorUnits {
    type Output = MinorUnits;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}
