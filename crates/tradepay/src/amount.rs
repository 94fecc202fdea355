//! Tradepay Amount
//!
//! Decimal money amount in the major unit of its currency (no minor-unit
//! scaling), parsed from what the user typed into the amount field.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thousands separator accepted (and rendered) in amount text
pub const THOUSANDS_SEPARATOR: char = ',';

/// Number of decimal places amounts are displayed with
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Amount Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Nothing was entered
    #[error("Amount is empty")]
    Empty,
    /// Input is not a decimal number
    #[error("Invalid Amount: {0}")]
    InvalidAmount(String),
}

/// Amount in the major unit of a currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Amount zero
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest representable amount
    pub const MAX: Amount = Amount(Decimal::MAX);

    /// Create an amount from a whole number of major units
    pub const fn from_units(units: i64) -> Self {
        Self(Decimal::from_parts(
            units.unsigned_abs() as u32,
            (units.unsigned_abs() >> 32) as u32,
            0,
            units < 0,
            0,
        ))
    }

    /// Parse the raw text of an amount field.
    ///
    /// Surrounding whitespace and thousands separators are ignored, so
    /// `"1,000,000.50"` parses to `1000000.50`. Negative numbers parse; it is
    /// up to the caller to reject them.
    pub fn parse_input(raw: &str) -> Result<Self, Error> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != THOUSANDS_SEPARATOR)
            .collect();

        if cleaned.is_empty() {
            return Err(Error::Empty);
        }

        let value = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| Error::InvalidAmount(raw.to_owned()))?;

        Ok(Self(value))
    }

    /// Inner decimal value
    #[inline(always)]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Clamp negative amounts to zero
    pub fn non_negative(self) -> Self {
        if self.0.is_sign_negative() {
            Self::ZERO
        } else {
            self
        }
    }

    /// Round half away from zero to the display precision
    pub fn round_for_display(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Render with thousands separators and two decimal places, e.g. `1,234.50`
    pub fn to_display_string(&self) -> String {
        group_thousands(
            &format!("{:.2}", self.round_for_display().0),
            DISPLAY_DECIMAL_PLACES as usize,
        )
    }

    /// Render a whole-unit limit with thousands separators, e.g. `1,000,000`
    pub fn to_limit_string(&self) -> String {
        let whole = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        group_thousands(&format!("{whole:.0}"), 0)
    }

    /// Checked addition for Amount. Returns None if overflow occurs.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction for Amount. Returns None if overflow occurs.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Checked multiplication by a rate. Returns None if overflow occurs.
    pub fn checked_mul(self, rate: Decimal) -> Option<Amount> {
        self.0.checked_mul(rate).map(Amount)
    }

    /// Subtraction clamped at the representable bounds
    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }
}

fn group_thousands(formatted: &str, decimals: usize) -> String {
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = if decimals > 0 {
        digits.split_once('.').unwrap_or((digits, ""))
    } else {
        (digits, "")
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Amount {
    type Output = Amount;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Amount(self.0 * rhs)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}
