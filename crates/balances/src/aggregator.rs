//! Balance sheet computation over a history snapshot.

use std::collections::{HashMap, HashSet};

use tabsplit_core::ExpenseId;
use tabsplit_splitting::{Expense, ExpenseSplit};

use crate::accumulator::BalanceAccumulator;
use crate::error::{BalanceResult, Inconsistency};
use crate::sheet::BalanceSheet;

/// Folds every expense and its split into one balance record per user.
///
/// Each expense must have exactly one split, and each split must reconcile
/// with its expense; anything else is reported as a data-consistency error
/// instead of producing a wrong sheet.
pub fn compute_balances(expenses: &[Expense], splits: &[ExpenseSplit]) -> BalanceResult<BalanceSheet> {
    let mut by_expense: HashMap<ExpenseId, &ExpenseSplit> = HashMap::with_capacity(splits.len());
    for split in splits {
        if by_expense.insert(split.expense_id(), split).is_some() {
            return Err(Inconsistency::DuplicateSplit(split.expense_id()).into());
        }
    }

    let mut seen: HashSet<ExpenseId> = HashSet::with_capacity(expenses.len());
    let mut pairs = Vec::with_capacity(expenses.len());
    for expense in expenses {
        if !seen.insert(expense.id) {
            return Err(Inconsistency::DuplicateExpense(expense.id).into());
        }
        let split = by_expense
            .remove(&expense.id)
            .ok_or(Inconsistency::MissingSplit(expense.id))?;
        pairs.push((expense, split));
    }

    if let Some(orphan) = by_expense.keys().min() {
        return Err(Inconsistency::OrphanSplit(*orphan).into());
    }

    let sheet = pairs
        .into_iter()
        .try_fold(BalanceAccumulator::new(), |acc, (expense, split)| acc.fold(expense, split))?
        .finish();

    tracing::debug!(
        expenses = expenses.len(),
        users = sheet.len(),
        "balance sheet computed"
    );

    Ok(sheet)
}
