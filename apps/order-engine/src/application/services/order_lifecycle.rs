//! Order lifecycle service.
//!
//! Orchestrates the order state machine over the stores: validation on
//! create, per-order-code write serialization, atomic order+position fill
//! application, and whole-namespace cache invalidation on every mutation.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::{AmendRequest, OrderRequest};
use crate::application::ports::ExecutionVenueClient;
use crate::domain::order_lifecycle::{
    Fill, Order, OrderCode, OrderError, OrderStore,
};
use crate::domain::position::{Position, PositionStore};
use crate::domain::shared::{AccountId, Money, Quantity, Timestamp};
use crate::domain::validation::ValidationGate;
use crate::infrastructure::cache::{ReadCache, cache_key};
use crate::infrastructure::locking::KeyedLocks;

/// Service driving the order lifecycle.
///
/// Generic over its stores and the venue client so adapters swap without
/// touching lifecycle logic.
pub struct OrderLifecycleService<O, P, V>
where
    O: OrderStore,
    P: PositionStore,
    V: ExecutionVenueClient,
{
    order_store: Arc<O>,
    position_store: Arc<P>,
    venue: Arc<V>,
    gate: ValidationGate,
    order_cache: Arc<ReadCache<Order>>,
    position_cache: Arc<ReadCache<Position>>,
    locks: KeyedLocks,
}

impl<O, P, V> OrderLifecycleService<O, P, V>
where
    O: OrderStore,
    P: PositionStore,
    V: ExecutionVenueClient,
{
    /// Create a new lifecycle service.
    pub fn new(
        order_store: Arc<O>,
        position_store: Arc<P>,
        venue: Arc<V>,
        gate: ValidationGate,
        order_cache: Arc<ReadCache<Order>>,
        position_cache: Arc<ReadCache<Position>>,
    ) -> Self {
        Self {
            order_store,
            position_store,
            venue,
            gate,
            order_cache,
            position_cache,
            locks: KeyedLocks::new(),
        }
    }

    /// Submit a new order.
    ///
    /// Runs the validation gate, allocates a unique order code, persists the
    /// order in PENDING status, and notifies the venue hook.
    ///
    /// # Errors
    ///
    /// Returns `Validation` on a gate rejection (nothing persisted), or
    /// `InvalidParameters` for structurally invalid requests.
    pub async fn submit_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let cmd = request.into_command();
        self.gate.validate(&cmd)?;

        let mut order = Order::new(cmd.clone())?;
        let mut attempts = 0;
        while self.order_store.exists(order.code()).await? {
            attempts += 1;
            if attempts > 3 {
                return Err(OrderError::Internal {
                    message: "order code allocation failed after repeated collisions".to_string(),
                });
            }
            warn!(order_code = %order.code(), "order code collision, regenerating");
            order = Order::new(cmd.clone())?;
        }

        self.order_store.save(&order).await?;
        self.order_cache.invalidate_all();

        if let Err(e) = self.venue.order_submitted(&order).await {
            warn!(order_code = %order.code(), error = %e, "venue submit notification failed");
        }

        info!(
            order_code = %order.code(),
            account_id = %order.account_id(),
            symbol = %order.symbol(),
            side = %order.side(),
            quantity = %order.quantity(),
            "order created"
        );
        Ok(order)
    }

    /// Fetch an order by code. Read-through cached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no order matches.
    pub async fn get_order(&self, code: &OrderCode) -> Result<Order, OrderError> {
        let key = cache_key("get_order", &[code.as_str()]);
        if let Some(order) = self.order_cache.get(&key) {
            return Ok(order);
        }

        let order = self.load(code).await?;
        self.order_cache.put(key, order.clone());
        Ok(order)
    }

    /// List orders, optionally restricted to one account. Read-through
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn list_orders(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<Order>, OrderError> {
        let key = account_id.map_or_else(
            || cache_key("list_orders", &[]),
            |id| cache_key("list_orders", &[id.as_str()]),
        );
        if let Some(orders) = self.order_cache.get_list(&key) {
            return Ok(orders);
        }

        let orders = match account_id {
            Some(id) => self.order_store.find_by_account(id).await?,
            None => self.order_store.find_all().await?,
        };
        self.order_cache.put_list(key, orders.clone());
        Ok(orders)
    }

    /// Amend price and/or quantity of a PENDING order.
    ///
    /// The validation gate is not re-run on amendment; see DESIGN.md.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code or `IllegalStateTransition`
    /// outside PENDING.
    pub async fn amend_order(
        &self,
        code: &OrderCode,
        request: AmendRequest,
    ) -> Result<Order, OrderError> {
        let lock = self.locks.for_key(code.as_str());
        let _guard = lock.lock().await;

        let mut order = self.load(code).await?;
        order.amend(request.into_amendment())?;

        self.order_store.save(&order).await?;
        self.order_cache.invalidate_all();

        info!(order_code = %code, "order amended");
        Ok(order)
    }

    /// Cancel an order. Legal from PENDING and PARTIALLY_FILLED.
    ///
    /// The record is kept with CANCELLED status, never deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code or `IllegalStateTransition`
    /// from a terminal status.
    pub async fn cancel_order(&self, code: &OrderCode) -> Result<(), OrderError> {
        let lock = self.locks.for_key(code.as_str());
        let _guard = lock.lock().await;

        let mut order = self.load(code).await?;
        order.cancel()?;

        self.order_store.save(&order).await?;
        self.order_cache.invalidate_all();

        if let Err(e) = self.venue.order_cancelled(code).await {
            warn!(order_code = %code, error = %e, "venue cancel notification failed");
        }

        info!(order_code = %code, "order cancelled");
        Ok(())
    }

    /// Apply an execution fill from the external feed.
    ///
    /// The order update and the position update happen inside one per-order
    /// critical section: either both are observable or neither is.
    ///
    /// # Errors
    ///
    /// Returns `IllegalStateTransition` in a terminal status or `OverFill`
    /// if the fill exceeds the remaining quantity.
    pub async fn apply_fill(
        &self,
        code: &OrderCode,
        quantity: Quantity,
        price: Money,
    ) -> Result<Order, OrderError> {
        let lock = self.locks.for_key(code.as_str());
        let _guard = lock.lock().await;

        let mut order = self.load(code).await?;
        order.apply_fill(Fill::new(quantity, price, Timestamp::now()))?;

        let mut position = self
            .position_store
            .find(order.account_id(), order.symbol())
            .await
            .map_err(internal)?
            .unwrap_or_else(|| {
                Position::new(order.account_id().clone(), order.symbol().clone())
            });
        position.apply_fill(order.side(), quantity, price);

        self.position_store.save(&position).await.map_err(internal)?;
        self.order_store.save(&order).await?;
        self.order_cache.invalidate_all();
        self.position_cache.invalidate_all();

        info!(
            order_code = %code,
            fill_quantity = %quantity,
            fill_price = %price,
            status = %order.status(),
            "fill applied"
        );
        Ok(order)
    }

    /// Mark a PENDING order rejected (venue or compliance feedback).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown code or `IllegalStateTransition`
    /// outside PENDING.
    pub async fn reject_order(&self, code: &OrderCode) -> Result<Order, OrderError> {
        let lock = self.locks.for_key(code.as_str());
        let _guard = lock.lock().await;

        let mut order = self.load(code).await?;
        order.reject()?;

        self.order_store.save(&order).await?;
        self.order_cache.invalidate_all();

        info!(order_code = %code, "order rejected");
        Ok(order)
    }

    async fn load(&self, code: &OrderCode) -> Result<Order, OrderError> {
        self.order_store
            .find_by_code(code)
            .await?
            .ok_or_else(|| OrderError::NotFound {
                order_code: code.to_string(),
            })
    }
}

fn internal(e: impl std::fmt::Display) -> OrderError {
    OrderError::Internal {
        message: e.to_string(),
    }
}
