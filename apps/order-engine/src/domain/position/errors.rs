//! Position errors.

use std::fmt;

/// Errors raised by position lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// No position exists for the (account, symbol) pair.
    NotFound {
        /// Account identifier.
        account_id: String,
        /// Instrument symbol.
        symbol: String,
    },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { account_id, symbol } => {
                write!(f, "Position not found: {account_id}/{symbol}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = PositionError::NotFound {
            account_id: "acct-1".to_string(),
            symbol: "AAPL".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("acct-1"));
        assert!(msg.contains("AAPL"));
    }
}
