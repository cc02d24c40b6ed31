//! `tabsplit-core`: shared value types for the expense-splitting engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).
//! Monetary values are integer minor units; decimals only appear at the
//! parse/format boundary.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod percentage;
pub mod user;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ExpenseId, UserId};
pub use money::Money;
pub use percentage::Percentage;
pub use user::User;
pub use value_object::ValueObject;
