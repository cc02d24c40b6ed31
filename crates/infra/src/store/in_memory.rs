use std::collections::HashMap;
use std::sync::RwLock;

use tabsplit_core::ExpenseId;

use super::{ExpenseStore, StoreError, StoredExpense};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredExpense>,
    index: HashMap<ExpenseId, usize>,
}

/// In-memory expense store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    inner: RwLock<Inner>,
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("in-memory store lock poisoned".to_string())
}

impl ExpenseStore for InMemoryExpenseStore {
    fn insert(&self, record: StoredExpense) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        let id = record.expense.id;
        if inner.index.contains_key(&id) {
            return Err(StoreError::Conflict(id));
        }
        let position = inner.records.len();
        inner.records.push(record);
        inner.index.insert(id, position);
        Ok(())
    }

    fn get(&self, id: ExpenseId) -> Result<Option<StoredExpense>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner
            .index
            .get(&id)
            .and_then(|&i| inner.records.get(i))
            .cloned())
    }

    fn list(&self) -> Result<Vec<StoredExpense>, StoreError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.clone())
    }
}
