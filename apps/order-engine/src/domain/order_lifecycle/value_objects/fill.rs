//! Execution fills.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, Quantity, Timestamp};

/// A single execution event against an order.
///
/// Fills arrive from the external execution feed; the core only records them
/// and folds them into cumulative fill state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Quantity executed in this fill.
    pub quantity: Quantity,
    /// Execution price for this fill.
    pub price: Money,
    /// When the fill occurred.
    pub timestamp: Timestamp,
}

impl Fill {
    /// Create a new fill.
    #[must_use]
    pub fn new(quantity: Quantity, price: Money, timestamp: Timestamp) -> Self {
        Self {
            quantity,
            price,
            timestamp,
        }
    }

    /// Notional value of this fill (price x quantity).
    #[must_use]
    pub fn notional(&self) -> Money {
        Money::new(self.price.amount() * self.quantity.amount())
    }
}
