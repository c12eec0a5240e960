//! Value objects for the order lifecycle.

mod fill;
mod fill_state;
mod order_code;
mod order_side;
mod order_status;
mod order_type;
mod time_in_force;

pub use fill::Fill;
pub use fill_state::FillState;
pub use order_code::OrderCode;
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use time_in_force::TimeInForce;
