//! Dependency wiring.
//!
//! Builds the concrete service graph from configuration: in-memory stores,
//! namespace caches, the no-op venue client, and the validation gate.

use std::sync::Arc;

use crate::application::ports::NoOpVenueClient;
use crate::application::services::{OrderLifecycleService, PositionService};
use crate::config::Config;
use crate::domain::validation::ValidationGate;
use crate::infrastructure::cache::ReadCache;
use crate::infrastructure::persistence::{InMemoryOrderStore, InMemoryPositionStore};

/// Lifecycle service over the in-memory adapters.
pub type DefaultOrderLifecycleService =
    OrderLifecycleService<InMemoryOrderStore, InMemoryPositionStore, NoOpVenueClient>;

/// Position service over the in-memory adapter.
pub type DefaultPositionService = PositionService<InMemoryPositionStore>;

/// Wired service container.
///
/// The position cache is shared between both services so fill application
/// on the lifecycle service invalidates position reads.
pub struct Container {
    /// Order lifecycle service.
    pub orders: Arc<DefaultOrderLifecycleService>,
    /// Position read service.
    pub positions: Arc<DefaultPositionService>,
}

impl Container {
    /// Wire the service graph from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let order_store = Arc::new(InMemoryOrderStore::new());
        let position_store = Arc::new(InMemoryPositionStore::new());
        let order_cache = Arc::new(ReadCache::new("orders", config.cache.enabled));
        let position_cache = Arc::new(ReadCache::new("positions", config.cache.enabled));
        let venue = Arc::new(NoOpVenueClient::new(config.venue.enabled));
        let gate = ValidationGate::new(config.validation.enabled);

        let orders = Arc::new(OrderLifecycleService::new(
            order_store,
            Arc::clone(&position_store),
            venue,
            gate,
            order_cache,
            Arc::clone(&position_cache),
        ));
        let positions = Arc::new(PositionService::new(position_store, position_cache));

        Self { orders, positions }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
