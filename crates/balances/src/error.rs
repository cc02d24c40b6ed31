//! Aggregation errors.

use thiserror::Error;

use tabsplit_core::{ExpenseId, Money, UserId};

pub type BalanceResult<T> = Result<T, BalanceError>;

/// What was wrong with the history handed to the aggregator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    #[error("expense {expense_id}: shares sum to {actual}, expected {expected}")]
    TotalMismatch {
        expense_id: ExpenseId,
        expected: Money,
        actual: Money,
    },

    #[error("expense {0} has no split")]
    MissingSplit(ExpenseId),

    #[error("expense {0} has more than one split")]
    DuplicateSplit(ExpenseId),

    #[error("split references unknown expense {0}")]
    OrphanSplit(ExpenseId),

    #[error("expense {0} appears more than once")]
    DuplicateExpense(ExpenseId),

    #[error("split for expense {split} was paired with expense {expense}")]
    MisattributedSplit { expense: ExpenseId, split: ExpenseId },

    #[error("expense {expense_id}: negative share for user {user_id}")]
    NegativeShare { expense_id: ExpenseId, user_id: UserId },

    #[error("expense {expense_id}: non-positive amount {amount}")]
    NonPositiveAmount { expense_id: ExpenseId, amount: Money },

    #[error("expense {0}: shares overflow the representable total")]
    ShareOverflow(ExpenseId),

    #[error("balance of user {0} overflowed")]
    Overflow(UserId),
}

/// Corrupt persisted data reached the aggregator.
///
/// Not recoverable locally: well-formed history only ever contains splits
/// produced by the split engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("data consistency error: {0}")]
    DataConsistency(#[from] Inconsistency),
}
