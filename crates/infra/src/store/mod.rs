//! Storage collaborator: the durable record of expenses and their splits.

pub mod in_memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabsplit_core::{ExpenseId, UserId};
use tabsplit_splitting::{Expense, ExpenseSplit};

pub use in_memory::InMemoryExpenseStore;

/// One persisted expense together with its split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredExpense {
    pub expense: Expense,
    pub split: ExpenseSplit,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An expense with this id already exists; records are never overwritten.
    #[error("expense {0} already recorded")]
    Conflict(ExpenseId),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Append-only expense storage.
///
/// Implementations serialize concurrent inserts; readers get a consistent
/// snapshot of the history.
pub trait ExpenseStore: Send + Sync {
    fn insert(&self, record: StoredExpense) -> Result<(), StoreError>;

    fn get(&self, id: ExpenseId) -> Result<Option<StoredExpense>, StoreError>;

    /// Every record, in insertion order.
    fn list(&self) -> Result<Vec<StoredExpense>, StoreError>;

    /// Expenses in which `user_id` holds a share.
    fn expenses_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.split.involves(user_id))
            .map(|r| r.expense)
            .collect())
    }
}

impl<S> ExpenseStore for Arc<S>
where
    S: ExpenseStore + ?Sized,
{
    fn insert(&self, record: StoredExpense) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn get(&self, id: ExpenseId) -> Result<Option<StoredExpense>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<StoredExpense>, StoreError> {
        (**self).list()
    }

    fn expenses_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, StoreError> {
        (**self).expenses_for_user(user_id)
    }
}
