//! Position store trait.
//!
//! Persistence abstraction for positions, keyed by (account, symbol). The
//! store must hold at most one position per key.

use async_trait::async_trait;

use super::aggregate::Position;
use super::errors::PositionError;
use crate::domain::shared::{AccountId, Symbol};

/// Repository trait for Position persistence.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Save a position (insert or update by (account, symbol)).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, position: &Position) -> Result<(), PositionError>;

    /// Find the position for an (account, symbol) pair.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Option<Position>, PositionError>;

    /// All positions for an account.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_account(&self, account_id: &AccountId)
        -> Result<Vec<Position>, PositionError>;

    /// All positions for a symbol across accounts.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_symbol(&self, symbol: &Symbol) -> Result<Vec<Position>, PositionError>;

    /// Every position in the store.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_all(&self) -> Result<Vec<Position>, PositionError>;
}
