//! Order store trait.
//!
//! Persistence abstraction for orders, implemented by adapters in the
//! infrastructure layer. Orders are keyed by their externally visible order
//! code, which the store must keep unique.

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::{OrderCode, OrderStatus};
use crate::domain::shared::{AccountId, Symbol};

/// Repository trait for Order persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Save an order (insert or update by order code).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Find an order by its order code.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_code(&self, code: &OrderCode) -> Result<Option<Order>, OrderError>;

    /// All orders for an account.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, OrderError>;

    /// All orders for a symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_symbol(&self, symbol: &Symbol) -> Result<Vec<Order>, OrderError>;

    /// All orders with the given status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;

    /// All orders for an account with the given status.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_account_and_status(
        &self,
        account_id: &AccountId,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderError>;

    /// Every order in the store.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Check whether an order code is already taken.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn exists(&self, code: &OrderCode) -> Result<bool, OrderError>;
}
