//! Position read service.
//!
//! Serves position lookups through the read cache. Positions are mutated
//! only by fill application on the lifecycle service, which shares this
//! service's cache and invalidates it on every fill.

use std::sync::Arc;

use crate::domain::position::{Position, PositionError, PositionStore};
use crate::domain::shared::{AccountId, Symbol};
use crate::infrastructure::cache::{ReadCache, cache_key};

/// Read-side service for positions.
pub struct PositionService<P>
where
    P: PositionStore,
{
    position_store: Arc<P>,
    cache: Arc<ReadCache<Position>>,
}

impl<P> PositionService<P>
where
    P: PositionStore,
{
    /// Create a new position service.
    pub fn new(position_store: Arc<P>, cache: Arc<ReadCache<Position>>) -> Self {
        Self {
            position_store,
            cache,
        }
    }

    /// Fetch the position for an (account, symbol) pair. Read-through
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no fill has ever touched the pair.
    pub async fn get_position(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Position, PositionError> {
        let key = cache_key("get_position", &[account_id.as_str(), symbol.as_str()]);
        if let Some(position) = self.cache.get(&key) {
            return Ok(position);
        }

        let position = self
            .position_store
            .find(account_id, symbol)
            .await?
            .ok_or_else(|| PositionError::NotFound {
                account_id: account_id.to_string(),
                symbol: symbol.to_string(),
            })?;
        self.cache.put(key, position.clone());
        Ok(position)
    }

    /// List positions, optionally restricted to one account. Read-through
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn list_positions(
        &self,
        account_id: Option<&AccountId>,
    ) -> Result<Vec<Position>, PositionError> {
        let key = account_id.map_or_else(
            || cache_key("list_positions", &[]),
            |id| cache_key("list_positions", &[id.as_str()]),
        );
        if let Some(positions) = self.cache.get_list(&key) {
            return Ok(positions);
        }

        let positions = match account_id {
            Some(id) => self.position_store.find_by_account(id).await?,
            None => self.position_store.find_all().await?,
        };
        self.cache.put_list(key, positions.clone());
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::OrderSide;
    use crate::domain::shared::{Money, Quantity};
    use crate::infrastructure::persistence::InMemoryPositionStore;
    use rust_decimal_macros::dec;

    async fn seeded_store() -> Arc<InMemoryPositionStore> {
        let store = Arc::new(InMemoryPositionStore::new());

        let mut pos = Position::new(AccountId::new("acct-1"), Symbol::new("AAPL"));
        pos.apply_fill(OrderSide::Buy, Quantity::from_i64(100), Money::new(dec!(10)));
        store.save(&pos).await.unwrap();

        let mut pos = Position::new(AccountId::new("acct-2"), Symbol::new("MSFT"));
        pos.apply_fill(OrderSide::Sell, Quantity::from_i64(50), Money::new(dec!(20)));
        store.save(&pos).await.unwrap();

        store
    }

    #[tokio::test]
    async fn get_position_reads_through() {
        let store = seeded_store().await;
        let cache = Arc::new(ReadCache::new("positions", true));
        let service = PositionService::new(store, Arc::clone(&cache));

        let position = service
            .get_position(&AccountId::new("acct-1"), &Symbol::new("AAPL"))
            .await
            .unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(100));

        // Second call is served from cache.
        assert!(!cache.is_empty());
        let again = service
            .get_position(&AccountId::new("acct-1"), &Symbol::new("AAPL"))
            .await
            .unwrap();
        assert_eq!(again, position);
    }

    #[tokio::test]
    async fn get_position_not_found() {
        let store = seeded_store().await;
        let service = PositionService::new(store, Arc::new(ReadCache::new("positions", true)));

        let err = service
            .get_position(&AccountId::new("acct-1"), &Symbol::new("ZZZ"))
            .await
            .unwrap_err();
        assert!(matches!(err, PositionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_positions_all_and_by_account() {
        let store = seeded_store().await;
        let service = PositionService::new(store, Arc::new(ReadCache::new("positions", true)));

        assert_eq!(service.list_positions(None).await.unwrap().len(), 2);
        assert_eq!(
            service
                .list_positions(Some(&AccountId::new("acct-2")))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
