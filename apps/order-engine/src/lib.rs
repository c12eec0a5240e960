// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Rust Core Library
//!
//! Order lifecycle and position tracking core for a brokerage system.
//!
//! # Architecture (Clean Architecture + DDD)
//!
//! ## Layers (inside -> outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects)
//!   - `order_lifecycle`: Order aggregate, status state machine, fill
//!     accounting
//!   - `position`: per-account, per-symbol aggregates with realized P&L
//!   - `validation`: pluggable pre-trade rule chain
//!   - `account`: brokerage account entity (opened externally)
//!
//! - **Application**: Orchestration over the stores
//!   - `services`: `OrderLifecycleService`, `PositionService`
//!   - `ports`: `ExecutionVenueClient` hook with a no-op default
//!   - `dto`: boundary request types
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: in-memory stores
//!   - `cache`: namespace read-through cache, whole-namespace invalidation
//!   - `locking`: per-order-code write serialization
//!   - `container`: dependency wiring from configuration
//!
//! Transport, durable persistence, real compliance rules, and venue
//! protocols are external collaborators; only their contracts live here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Services, ports, and boundary DTOs.
pub mod application;

/// Infrastructure layer - Adapters and wiring.
pub mod infrastructure;

/// Configuration loading.
pub mod config;

/// Tracing setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::account::{Account, AccountStatus};
pub use domain::order_lifecycle::{
    CreateOrderCommand, Fill, Order, OrderAmendment, OrderCode, OrderError, OrderSide,
    OrderStateMachine, OrderStatus, OrderStore, OrderType, TimeInForce,
};
pub use domain::position::{Position, PositionError, PositionMark, PositionStore};
pub use domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};
pub use domain::validation::{
    QuantityRule, SymbolRule, ValidationError, ValidationGate, ValidationRule,
};

// Application re-exports
pub use application::dto::{AmendRequest, OrderRequest};
pub use application::ports::{ExecutionVenueClient, NoOpVenueClient, VenueError};
pub use application::services::{OrderLifecycleService, PositionService};

// Infrastructure re-exports
pub use config::{Config, ConfigError, load_config};
pub use infrastructure::cache::ReadCache;
pub use infrastructure::container::Container;
pub use infrastructure::persistence::{InMemoryOrderStore, InMemoryPositionStore};
