//! Balance records and the balance sheet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tabsplit_core::{Money, UserId};

/// Derived per-user totals. Never stored; recomputed from history.
///
/// A positive `net` means the group owes the user; negative means the user
/// owes the group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub paid: Money,
    pub owed: Money,
    pub net: Money,
}

impl BalanceRecord {
    pub fn new(paid: Money, owed: Money) -> Self {
        Self {
            paid,
            owed,
            net: paid - owed,
        }
    }
}

/// One rendered line of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub user_id: UserId,
    pub paid: Money,
    pub owed: Money,
    pub net: Money,
}

/// Balance records for every user who appears in the history, ordered by id.
///
/// Users without any recorded activity are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    records: BTreeMap<UserId, BalanceRecord>,
}

impl BalanceSheet {
    /// Column names of [`BalanceSheet::rows`], in order.
    pub const COLUMNS: [&'static str; 4] = ["user_id", "paid", "owed", "net"];

    pub(crate) fn from_records(records: BTreeMap<UserId, BalanceRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, user_id: UserId) -> Option<&BalanceRecord> {
        self.records.get(&user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &BalanceRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every user's net; `Some(Money::ZERO)` for any consistent
    /// history. `None` only if the sum itself does not fit in [`Money`].
    pub fn total_net(&self) -> Option<Money> {
        let total: i128 = self
            .records
            .values()
            .map(|r| i128::from(r.net.minor_units()))
            .sum();
        i64::try_from(total).ok().map(Money::new)
    }

    pub fn rows(&self) -> Vec<BalanceRow> {
        self.records
            .iter()
            .map(|(&user_id, record)| BalanceRow {
                user_id,
                paid: record.paid,
                owed: record.owed,
                net: record.net,
            })
            .collect()
    }
}
