//! Split methods.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tabsplit_core::{DomainError, Money, Percentage, UserId};

/// How an expense is divided, with the per-method parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "parameters", rename_all = "lowercase")]
pub enum SplitMethod {
    /// Even division; leftover minor units go one each to participants in input order.
    Equal,
    /// Explicit amount per participant; must sum to the expense amount.
    Exact(Vec<(UserId, Money)>),
    /// Percentage per participant; must sum to 100% (±0.01%).
    Percentage(Vec<(UserId, Percentage)>),
}

impl SplitMethod {
    pub fn kind(&self) -> SplitMethodKind {
        match self {
            SplitMethod::Equal => SplitMethodKind::Equal,
            SplitMethod::Exact(_) => SplitMethodKind::Exact,
            SplitMethod::Percentage(_) => SplitMethodKind::Percentage,
        }
    }
}

/// Parameter-free tag of a split method, as recorded on an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitMethodKind {
    Equal,
    Exact,
    Percentage,
}

impl SplitMethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitMethodKind::Equal => "Equal",
            SplitMethodKind::Exact => "Exact",
            SplitMethodKind::Percentage => "Percentage",
        }
    }
}

impl fmt::Display for SplitMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitMethodKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Equal" => Ok(SplitMethodKind::Equal),
            "Exact" => Ok(SplitMethodKind::Exact),
            "Percentage" => Ok(SplitMethodKind::Percentage),
            other => Err(DomainError::validation(format!("unknown split method: {other:?}"))),
        }
    }
}
