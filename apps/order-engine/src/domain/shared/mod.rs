//! Shared domain kernel: errors and value objects.

mod errors;
mod value_objects;

pub use errors::DomainError;
pub use value_objects::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};
