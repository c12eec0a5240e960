//! Order lifecycle domain: aggregate, state machine, fill accounting.

mod aggregate;
mod errors;
mod repository;
mod services;
mod value_objects;

pub use aggregate::{CreateOrderCommand, Order, OrderAmendment};
pub use errors::OrderError;
pub use repository::OrderStore;
pub use services::OrderStateMachine;
pub use value_objects::{
    Fill, FillState, OrderCode, OrderSide, OrderStatus, OrderType, TimeInForce,
};
