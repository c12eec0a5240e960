//! Domain services for the order lifecycle.

mod state_machine;

pub use state_machine::OrderStateMachine;
