//! Expense-recording workflow.
//!
//! ```text
//! NewExpense
//!   ↓
//! 1. Split engine (pure validation + share computation)
//!   ↓
//! 2. Persist expense + split (store)
//!
//! Balance sheet request
//!   ↓
//! 1. Snapshot history (store)
//!   ↓
//! 2. Aggregate (fails fast on inconsistent records)
//! ```
//!
//! Invalid input is rejected before anything reaches storage.

use chrono::Utc;
use thiserror::Error;

use tabsplit_balances::{BalanceError, BalanceSheet, compute_balances};
use tabsplit_core::UserId;
use tabsplit_splitting::{Expense, ExpenseSplit, NewExpense, SplitError};

use crate::store::{ExpenseStore, StoreError, StoredExpense};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The submitted expense was rejected; nothing was persisted.
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Persisted history is corrupt.
    #[error(transparent)]
    Balance(#[from] BalanceError),
}

pub struct ExpenseLedger<S> {
    store: S,
}

impl<S> ExpenseLedger<S>
where
    S: ExpenseStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Splits and persists a new expense.
    pub fn record_expense(&self, new_expense: NewExpense) -> Result<(Expense, ExpenseSplit), LedgerError> {
        let expense_id = new_expense.id;
        let (expense, split) = new_expense.into_parts().inspect_err(|e| {
            tracing::warn!(%expense_id, error = %e, "expense rejected");
        })?;

        self.store.insert(StoredExpense {
            expense: expense.clone(),
            split: split.clone(),
            recorded_at: Utc::now(),
        })?;

        tracing::info!(
            %expense_id,
            payer = %expense.payer,
            amount = %expense.amount,
            method = %expense.method,
            "expense recorded"
        );

        Ok((expense, split))
    }

    /// Recomputes the balance sheet from the full stored history.
    pub fn balance_sheet(&self) -> Result<BalanceSheet, LedgerError> {
        let (expenses, splits): (Vec<Expense>, Vec<ExpenseSplit>) = self
            .store
            .list()?
            .into_iter()
            .map(|r| (r.expense, r.split))
            .unzip();

        compute_balances(&expenses, &splits).map_err(|e| {
            tracing::error!(error = %e, "stored expense history is inconsistent");
            LedgerError::from(e)
        })
    }

    /// Expenses the user has a share in.
    pub fn expenses_for_user(&self, user_id: UserId) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.store.expenses_for_user(user_id)?)
    }
}
