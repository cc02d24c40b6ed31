//! Monetary amounts in integer minor units.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Minor units per major unit (two decimal places).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest magnitude accepted from floating-point input, in major units.
///
/// Beyond 2^53 minor units an `f64` can no longer represent every cent.
const MAX_MAJOR_F64: f64 = 90_071_992_547_409.0;

/// Signed money amount represented as **integer minor units** (cents).
///
/// All arithmetic inside the engine happens on this type so that split shares
/// reconcile exactly. Decimal strings and floats are accepted only at the
/// boundary:
///
/// ```rust
/// use tabsplit_core::Money;
///
/// let amount: Money = "33.34".parse().unwrap();
/// assert_eq!(amount.minor_units(), 3334);
/// assert_eq!(amount.to_string(), "33.34");
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from integer minor units.
    #[must_use]
    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Converts a major-unit float (e.g. `33.33`) into minor units.
    ///
    /// Rounds half away from zero to the nearest minor unit. Rejects NaN,
    /// infinities and magnitudes that `f64` cannot carry to the cent.
    pub fn from_major_f64(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("amount must be a finite number"));
        }
        if value.abs() > MAX_MAJOR_F64 {
            return Err(DomainError::validation("amount too large"));
        }
        let minor = (value * MINOR_UNITS_PER_MAJOR as f64).round();
        Ok(Self(minor as i64))
    }

    /// Lossy conversion back to a major-unit float, for display adapters only.
    #[must_use]
    pub fn to_major_f64(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed2(f, self.0)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`;
    /// rejects more than two fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed2(s, "amount").map(Money)
    }
}

/// Formats a value scaled by 100 as `[-]N.NN`.
pub(crate) fn write_fixed2(f: &mut fmt::Formatter<'_>, scaled: i64) -> fmt::Result {
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.unsigned_abs();
    write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Parses a decimal with at most two fractional digits into a value scaled by 100.
pub(crate) fn parse_fixed2(s: &str, what: &str) -> DomainResult<i64> {
    let invalid = || DomainError::validation(format!("invalid {what}: {s:?}"));
    let overflow = || DomainError::validation(format!("{what} too large: {s:?}"));

    let trimmed = s.trim();
    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, trimmed)
    };

    let rest = rest.replace(',', ".");
    let (whole, frac) = match rest.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (rest.as_str(), ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        2 => frac.parse::<i64>().map_err(|_| invalid())?,
        _ => {
            return Err(DomainError::validation(format!(
                "{what} has more than two decimals: {s:?}"
            )));
        }
    };

    let total = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(overflow)?;

    Ok(if negative { -total } else { total })
}
