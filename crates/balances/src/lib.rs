//! Balance Aggregator: folds the expense history into per-user balances.
//!
//! Pure domain logic only. The fold is plain summation, so partial results
//! over any partition of the history can be merged in any order.

pub mod accumulator;
pub mod aggregator;
pub mod error;
pub mod sheet;

pub use accumulator::BalanceAccumulator;
pub use aggregator::compute_balances;
pub use error::{BalanceError, BalanceResult, Inconsistency};
pub use sheet::{BalanceRecord, BalanceRow, BalanceSheet};
