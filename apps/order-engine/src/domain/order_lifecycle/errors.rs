//! Order lifecycle errors.

use std::fmt;

use super::value_objects::OrderStatus;
use crate::domain::validation::ValidationError;

/// Errors raised by order lifecycle operations.
///
/// Every variant carries the entity key and enough state to explain the
/// rejection without exposing storage internals. None of these should crash
/// the service; retries belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Pre-trade validation rejected the request; nothing was persisted.
    Validation(ValidationError),

    /// No order matches the given code.
    NotFound {
        /// Order code used for the lookup.
        order_code: String,
    },

    /// Operation not legal in the order's current status.
    IllegalStateTransition {
        /// Order code.
        order_code: String,
        /// Current status.
        status: OrderStatus,
        /// Attempted operation ("amend", "cancel", "fill", ...).
        operation: String,
    },

    /// Fill would exceed the remaining open quantity. Indicates a bug in the
    /// upstream execution feed; surfaced loudly rather than clamped.
    OverFill {
        /// Order code.
        order_code: String,
        /// Quantity of the offending fill.
        fill_qty: String,
        /// Quantity still open.
        remaining_qty: String,
    },

    /// Structurally invalid order parameters.
    InvalidParameters {
        /// Field with the invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Store or integration failure surfaced from an adapter.
    Internal {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Order rejected: {e}"),
            Self::NotFound { order_code } => write!(f, "Order not found: {order_code}"),
            Self::IllegalStateTransition {
                order_code,
                status,
                operation,
            } => {
                write!(
                    f,
                    "Cannot {operation} order {order_code} in status {status}"
                )
            }
            Self::OverFill {
                order_code,
                fill_qty,
                remaining_qty,
            } => {
                write!(
                    f,
                    "Fill of {fill_qty} exceeds remaining {remaining_qty} on order {order_code}"
                )
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<ValidationError> for OrderError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
