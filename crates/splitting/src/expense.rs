//! Expenses and their splits.

use serde::{Deserialize, Serialize};

use tabsplit_core::{Entity, ExpenseId, Money, UserId};

use crate::engine::compute_split;
use crate::error::SplitResult;
use crate::method::{SplitMethod, SplitMethodKind};

/// An expense as submitted by a user, before it has been split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub id: ExpenseId,
    pub amount: Money,
    pub description: String,
    pub payer: UserId,
    /// Ordered; the order decides who receives leftover minor units.
    pub participants: Vec<UserId>,
    pub method: SplitMethod,
}

impl NewExpense {
    /// Splits the expense and returns the immutable records to persist.
    pub fn into_parts(self) -> SplitResult<(Expense, ExpenseSplit)> {
        let split = compute_split(&self)?;
        let expense = Expense {
            id: self.id,
            amount: self.amount,
            description: self.description,
            payer: self.payer,
            method: self.method.kind(),
        };
        Ok((expense, split))
    }
}

/// One recorded financial event. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Money,
    pub description: String,
    pub payer: UserId,
    pub method: SplitMethodKind,
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One participant's portion of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub user_id: UserId,
    pub amount: Money,
}

/// The per-user shares of exactly one expense, in participant input order.
///
/// Splits produced by [`compute_split`] always sum to the expense amount.
/// [`ExpenseSplit::from_stored`] performs no such check; the balance
/// aggregator re-validates anything that comes back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    expense_id: ExpenseId,
    method: SplitMethodKind,
    shares: Vec<Share>,
}

impl ExpenseSplit {
    pub(crate) fn new(expense_id: ExpenseId, method: SplitMethodKind, shares: Vec<Share>) -> Self {
        Self {
            expense_id,
            method,
            shares,
        }
    }

    /// Rehydrates a split from persisted rows without validating it.
    pub fn from_stored(expense_id: ExpenseId, method: SplitMethodKind, shares: Vec<Share>) -> Self {
        Self::new(expense_id, method, shares)
    }

    pub fn expense_id(&self) -> ExpenseId {
        self.expense_id
    }

    pub fn method(&self) -> SplitMethodKind {
        self.method
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// Sum of all shares; `None` if it does not fit in [`Money`].
    pub fn total(&self) -> Option<Money> {
        self.shares
            .iter()
            .try_fold(Money::ZERO, |acc, s| acc.checked_add(s.amount))
    }

    pub fn share_of(&self, user_id: UserId) -> Option<Money> {
        self.shares
            .iter()
            .find(|s| s.user_id == user_id)
            .map(|s| s.amount)
    }

    pub fn involves(&self, user_id: UserId) -> bool {
        self.shares.iter().any(|s| s.user_id == user_id)
    }
}
