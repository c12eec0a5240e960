//! Brokerage account entity.
//!
//! Accounts are opened and funded externally; the core holds them so orders
//! and positions can reference a consistent owner record. Balance mutation
//! happens at settlement, outside this core.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{AccountId, Money, Timestamp};

/// Account standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Open for trading.
    Active,
    /// Trading temporarily blocked.
    Suspended,
    /// Permanently closed.
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Suspended => write!(f, "SUSPENDED"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A brokerage account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Internal identifier.
    pub id: AccountId,
    /// Globally unique account number.
    pub account_number: String,
    /// Display name.
    pub account_name: String,
    /// Account type, e.g. "INDIVIDUAL" or "MARGIN".
    pub account_type: String,
    /// Cash balance.
    pub balance: Money,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Account standing.
    pub status: AccountStatus,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

impl Account {
    /// True when the account may place orders.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(status: AccountStatus) -> Account {
        let now = Timestamp::now();
        Account {
            id: AccountId::new("acct-1"),
            account_number: "BR-0001".to_string(),
            account_name: "Test Account".to_string(),
            account_type: "INDIVIDUAL".to_string(),
            balance: Money::new(dec!(25000)),
            currency: "USD".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_account_can_trade() {
        assert!(account(AccountStatus::Active).is_active());
        assert!(!account(AccountStatus::Suspended).is_active());
        assert!(!account(AccountStatus::Closed).is_active());
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", AccountStatus::Active), "ACTIVE");
        assert_eq!(format!("{}", AccountStatus::Closed), "CLOSED");
    }

    #[test]
    fn serde_roundtrip() {
        let acct = account(AccountStatus::Active);
        let json = serde_json::to_string(&acct).unwrap();
        assert!(json.contains("\"ACTIVE\""));
        let parsed: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, acct);
    }
}
