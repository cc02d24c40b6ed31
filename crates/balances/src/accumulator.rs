//! Partial balance sums.

use std::collections::BTreeMap;

use tabsplit_core::{Money, UserId};
use tabsplit_splitting::{Expense, ExpenseSplit};

use crate::error::{BalanceResult, Inconsistency};
use crate::sheet::{BalanceRecord, BalanceSheet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    paid: Money,
    owed: Money,
}

/// Running `paid`/`owed` sums over some part of the expense history.
///
/// Folding is pure summation: accumulators built over disjoint partitions of
/// the history can be [`merge`](Self::merge)d in any order and yield the same
/// sheet as a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceAccumulator {
    totals: BTreeMap<UserId, Totals>,
}

impl BalanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one expense and its split.
    ///
    /// Rejects pairs that could not have come from the split engine.
    pub fn fold(mut self, expense: &Expense, split: &ExpenseSplit) -> BalanceResult<Self> {
        check_pair(expense, split)?;

        let payer = self.totals.entry(expense.payer).or_default();
        payer.paid = payer
            .paid
            .checked_add(expense.amount)
            .ok_or(Inconsistency::Overflow(expense.payer))?;

        for share in split.shares() {
            let totals = self.totals.entry(share.user_id).or_default();
            totals.owed = totals
                .owed
                .checked_add(share.amount)
                .ok_or(Inconsistency::Overflow(share.user_id))?;
        }

        Ok(self)
    }

    /// Combines two partial sums.
    pub fn merge(mut self, other: BalanceAccumulator) -> BalanceResult<Self> {
        for (user_id, theirs) in other.totals {
            let ours = self.totals.entry(user_id).or_default();
            ours.paid = ours
                .paid
                .checked_add(theirs.paid)
                .ok_or(Inconsistency::Overflow(user_id))?;
            ours.owed = ours
                .owed
                .checked_add(theirs.owed)
                .ok_or(Inconsistency::Overflow(user_id))?;
        }
        Ok(self)
    }

    pub fn finish(self) -> BalanceSheet {
        let records = self
            .totals
            .into_iter()
            .map(|(user_id, t)| (user_id, BalanceRecord::new(t.paid, t.owed)))
            .collect();
        BalanceSheet::from_records(records)
    }
}

fn check_pair(expense: &Expense, split: &ExpenseSplit) -> Result<(), Inconsistency> {
    if split.expense_id() != expense.id {
        return Err(Inconsistency::MisattributedSplit {
            expense: expense.id,
            split: split.expense_id(),
        });
    }
    if !expense.amount.is_positive() {
        return Err(Inconsistency::NonPositiveAmount {
            expense_id: expense.id,
            amount: expense.amount,
        });
    }
    if let Some(share) = split.shares().iter().find(|s| s.amount.is_negative()) {
        return Err(Inconsistency::NegativeShare {
            expense_id: expense.id,
            user_id: share.user_id,
        });
    }

    let actual = split
        .total()
        .ok_or(Inconsistency::ShareOverflow(expense.id))?;
    if actual != expense.amount {
        return Err(Inconsistency::TotalMismatch {
            expense_id: expense.id,
            expected: expense.amount,
            actual,
        });
    }
    Ok(())
}
