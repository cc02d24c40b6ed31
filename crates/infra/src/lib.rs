//! Infrastructure layer: configuration, storage, export and the
//! expense-recording workflow around the pure split/balance core.

pub mod config;
pub mod directory;
pub mod export;
pub mod ledger;
pub mod store;


pub use config::{ConfigError, Settings};
pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use export::{ExportError, to_csv_string, to_json, write_csv};
pub use ledger::{ExpenseLedger, LedgerError};
pub use store::{ExpenseStore, InMemoryExpenseStore, StoreError, StoredExpense};
