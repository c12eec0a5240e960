//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
///
/// A closed enumeration: unknown values are rejected at the serde boundary
/// rather than carried as free text. Transitions between statuses are
/// validated by the order state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted and persisted, no fills yet.
    Pending,
    /// Some quantity filled, remainder still open.
    PartiallyFilled,
    /// Completely filled. Terminal.
    Filled,
    /// Cancelled before completion. Terminal.
    Cancelled,
    /// Rejected before reaching a venue. Terminal.
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled | Self::Rejected)
    }

    /// Returns true if the order can be cancelled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }

    /// Returns true if the order can receive fills.
    #[must_use]
    pub const fn can_fill(&self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }

    /// Returns true if the order can be amended.
    ///
    /// Only orders that have not begun executing are amendable.
    #[must_use]
    pub const fn is_amendable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}
