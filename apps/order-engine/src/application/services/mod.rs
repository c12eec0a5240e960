//! Application services orchestrating the domain over the stores.

mod order_lifecycle;
mod position_service;

pub use order_lifecycle::OrderLifecycleService;
pub use position_service::PositionService;
