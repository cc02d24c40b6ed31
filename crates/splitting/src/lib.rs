//! Split Engine: turns one expense plus a split method into per-user shares.
//!
//! Pure domain logic only: no IO, no persistence concerns. Every split this
//! crate returns reconciles exactly to the expense amount.

pub mod engine;
pub mod error;
pub mod expense;
pub mod method;

pub use engine::compute_split;
pub use error::{Mismatch, SplitError, SplitResult};
pub use expense::{Expense, ExpenseSplit, NewExpense, Share};
pub use method::{SplitMethod, SplitMethodKind};
