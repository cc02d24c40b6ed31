//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// `Money` and `Percentage` are value objects: two amounts of 1234 minor units
/// are the same amount, whatever expense they came from. An `Expense` is an
/// entity: two expenses of the same amount are still different expenses.
///
/// Value objects are immutable; arithmetic returns new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
