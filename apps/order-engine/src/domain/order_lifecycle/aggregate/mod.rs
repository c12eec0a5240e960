//! Order aggregate.

mod order;

pub use order::{CreateOrderCommand, Order, OrderAmendment};
