//! Percentages in integer basis points.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::money::{parse_fixed2, write_fixed2};
use crate::value_object::ValueObject;

/// A percentage stored as basis points (1 bp = 0.01%).
///
/// `Percentage::FULL` (10 000 bp) is 100%. Two fractional digits of a percent
/// are the finest resolution accepted from input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(i64);

impl ValueObject for Percentage {}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(10_000);

    #[must_use]
    pub const fn from_basis_points(bp: i64) -> Self {
        Self(bp)
    }

    #[must_use]
    pub const fn basis_points(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Percentage) -> Option<Percentage> {
        self.0.checked_add(rhs.0).map(Percentage)
    }

    /// Converts a float percent (e.g. `33.33`) into basis points, rounding to
    /// the nearest basis point.
    pub fn from_f64(percent: f64) -> DomainResult<Self> {
        if !percent.is_finite() {
            return Err(DomainError::validation("percentage must be a finite number"));
        }
        if percent.abs() > 1e12 {
            return Err(DomainError::validation("percentage too large"));
        }
        Ok(Self((percent * 100.0).round() as i64))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed2(f, self.0)?;
        f.write_str("%")
    }
}

impl Add for Percentage {
    type Output = Percentage;

    fn add(self, rhs: Percentage) -> Self::Output {
        Percentage(self.0 + rhs.0)
    }
}

impl Sum for Percentage {
    fn sum<I: Iterator<Item = Percentage>>(iter: I) -> Self {
        iter.fold(Percentage::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Percentage> for Percentage {
    fn sum<I: Iterator<Item = &'a Percentage>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Percentage {
    type Err = DomainError;

    /// Parses `"33.33"` or `"33.33%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
        parse_fixed2(number, "percentage").map(Percentage)
    }
}
