//! Split validation errors.
//!
//! All of these describe malformed caller input; the expense is rejected
//! before anything is persisted.

use core::fmt;

use thiserror::Error;

use tabsplit_core::{Money, Percentage, UserId};

pub type SplitResult<T> = Result<T, SplitError>;

/// Expected vs. supplied totals of a rejected Exact or Percentage split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    Amount { expected: Money, actual: Money },
    Percentage { expected: Percentage, actual: Percentage },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Amount { expected, actual } => {
                write!(f, "amounts sum to {actual}, expected {expected}")
            }
            Mismatch::Percentage { expected, actual } => {
                write!(f, "percentages sum to {actual}, expected {expected}")
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Expense amount must be strictly positive.
    #[error("invalid amount {0}: must be greater than zero")]
    InvalidAmount(Money),

    #[error("no participants supplied")]
    EmptyParticipants,

    /// Exact/Percentage parameters name a user outside the participant list.
    #[error("user {0} is not a participant of this expense")]
    UnknownParticipant(UserId),

    /// Exact/Percentage inputs do not reconcile with the expense.
    #[error("split does not reconcile: {0}")]
    SplitMismatch(Mismatch),

    /// The same user is listed twice (participants or parameters).
    #[error("user {0} is listed more than once")]
    DuplicateParticipant(UserId),

    /// Exact/Percentage parameters leave out a participant.
    #[error("no share supplied for participant {0}")]
    MissingShare(UserId),

    #[error("negative share supplied for participant {0}")]
    NegativeShare(UserId),

    /// Supplied Exact/Percentage values add up past the representable range.
    #[error("supplied shares overflow the representable total")]
    ShareOverflow,

    /// Computed shares failed the exact-reconciliation post-condition.
    #[error("computed shares sum to {actual}, expected {expected}")]
    Reconciliation { expected: Money, actual: Money },
}
