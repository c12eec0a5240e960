//! In-memory stores.
//!
//! Reference implementations of the store traits, backed by RwLock'd maps.
//! Uniqueness constraints (order code, (account, symbol)) fall out of the
//! map keys. Suitable for tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::order_lifecycle::{Order, OrderCode, OrderError, OrderStatus, OrderStore};
use crate::domain::position::{Position, PositionError, PositionStore};
use crate::domain::shared::{AccountId, Symbol};

/// In-memory implementation of [`OrderStore`], keyed by order code.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Number of orders held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// True when no orders are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write();
        orders.insert(order.code().to_string(), order.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &OrderCode) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders.get(code.as_str()).cloned())
    }

    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders
            .values()
            .filter(|o| o.account_id() == account_id)
            .cloned()
            .collect())
    }

    async fn find_by_symbol(&self, symbol: &Symbol) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders
            .values()
            .filter(|o| o.symbol() == symbol)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders
            .values()
            .filter(|o| o.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_account_and_status(
        &self,
        account_id: &AccountId,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders
            .values()
            .filter(|o| o.account_id() == account_id && o.status() == status)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read();
        Ok(orders.values().cloned().collect())
    }

    async fn exists(&self, code: &OrderCode) -> Result<bool, OrderError> {
        let orders = self.orders.read();
        Ok(orders.contains_key(code.as_str()))
    }
}

/// In-memory implementation of [`PositionStore`], keyed by (account, symbol).
#[derive(Debug, Default)]
pub struct InMemoryPositionStore {
    positions: RwLock<HashMap<(String, String), Position>>,
}

impl InMemoryPositionStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of positions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.read().len()
    }

    /// True when no positions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.read().is_empty()
    }

    fn key(account_id: &AccountId, symbol: &Symbol) -> (String, String) {
        (account_id.to_string(), symbol.to_string())
    }
}

#[async_trait]
impl PositionStore for InMemoryPositionStore {
    async fn save(&self, position: &Position) -> Result<(), PositionError> {
        let mut positions = self.positions.write();
        positions.insert(
            Self::key(position.account_id(), position.symbol()),
            position.clone(),
        );
        Ok(())
    }

    async fn find(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Option<Position>, PositionError> {
        let positions = self.positions.read();
        Ok(positions.get(&Self::key(account_id, symbol)).cloned())
    }

    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Position>, PositionError> {
        let positions = self.positions.read();
        Ok(positions
            .values()
            .filter(|p| p.account_id() == account_id)
            .cloned()
            .collect())
    }

    async fn find_by_symbol(&self, symbol: &Symbol) -> Result<Vec<Position>, PositionError> {
        let positions = self.positions.read();
        Ok(positions
            .values()
            .filter(|p| p.symbol() == symbol)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Position>, PositionError> {
        let positions = self.positions.read();
        Ok(positions.values().cloned().collect())
    }
}
