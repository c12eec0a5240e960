//! Execution venue port (driven port).
//!
//! Hook point for routing accepted orders and cancellations to an external
//! execution venue. The core only notifies; fills come back through
//! `apply_fill` on the lifecycle service. The default implementation is a
//! logging no-op so the core runs without any venue connectivity.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::order_lifecycle::{Order, OrderCode};

/// Venue communication error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VenueError {
    /// Connection to the venue failed.
    #[error("Venue connection error: {message}")]
    ConnectionError {
        /// Error message.
        message: String,
    },

    /// Venue rejected the message.
    #[error("Venue rejected message: {message}")]
    Rejected {
        /// Error message.
        message: String,
    },
}

/// Port for execution venue notifications.
#[async_trait]
pub trait ExecutionVenueClient: Send + Sync {
    /// Notify the venue of a newly accepted order.
    ///
    /// # Errors
    ///
    /// Returns error if the notification cannot be delivered.
    async fn order_submitted(&self, order: &Order) -> Result<(), VenueError>;

    /// Notify the venue of a cancellation.
    ///
    /// # Errors
    ///
    /// Returns error if the notification cannot be delivered.
    async fn order_cancelled(&self, code: &OrderCode) -> Result<(), VenueError>;
}

/// No-op venue client.
///
/// Stands in for a real venue integration. When disabled it stays silent;
/// when enabled it logs the notifications a real client would send.
#[derive(Debug, Clone)]
pub struct NoOpVenueClient {
    enabled: bool,
}

impl NoOpVenueClient {
    /// Create a no-op client.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for NoOpVenueClient {
    fn default() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl ExecutionVenueClient for NoOpVenueClient {
    async fn order_submitted(&self, order: &Order) -> Result<(), VenueError> {
        if self.enabled {
            info!(order_code = %order.code(), symbol = %order.symbol(), "order routed to venue");
        } else {
            debug!("venue integration disabled");
        }
        Ok(())
    }

    async fn order_cancelled(&self, code: &OrderCode) -> Result<(), VenueError> {
        if self.enabled {
            info!(order_code = %code, "cancel routed to venue");
        } else {
            debug!("venue integration disabled");
        }
        Ok(())
    }
}
