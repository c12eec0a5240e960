//! Boundary data-transfer objects.
//!
//! Incoming request shapes at the service boundary. Transport encoding
//! (routing, HTTP serialization) lives outside this crate; these types are
//! the contract it converts into.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{
    CreateOrderCommand, OrderAmendment, OrderSide, OrderType, TimeInForce,
};
use crate::domain::shared::{AccountId, Money, Quantity, Symbol};

/// Request to place a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Account placing the order.
    pub account_id: String,
    /// Symbol to trade.
    pub symbol: String,
    /// Order type.
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Quantity to trade.
    pub quantity: Decimal,
    /// Limit price (required for LIMIT/STOP_LIMIT).
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Time in force; defaults to DAY when unspecified.
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
}

impl OrderRequest {
    /// Convert into the domain create command.
    #[must_use]
    pub fn into_command(self) -> CreateOrderCommand {
        CreateOrderCommand {
            account_id: AccountId::new(self.account_id),
            symbol: Symbol::new(self.symbol),
            order_type: self.order_type,
            side: self.side,
            quantity: Quantity::new(self.quantity),
            limit_price: self.limit_price.map(Money::new),
            time_in_force: self.time_in_force.unwrap_or_default(),
        }
    }
}

/// Request to amend a pending order. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmendRequest {
    /// New quantity, if amending.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// New limit price, if amending.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl AmendRequest {
    /// Convert into the domain amendment.
    #[must_use]
    pub fn into_amendment(self) -> OrderAmendment {
        OrderAmendment {
            quantity: self.quantity.map(Quantity::new),
            price: self.price.map(Money::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_request_into_command() {
        let request = OrderRequest {
            account_id: "acct-1".to_string(),
            symbol: "aapl".to_string(),
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
            quantity: dec!(100),
            limit_price: Some(dec!(150.00)),
            time_in_force: None,
        };

        let cmd = request.into_command();
        assert_eq!(cmd.symbol.as_str(), "AAPL");
        assert_eq!(cmd.quantity, Quantity::from_i64(100));
        assert_eq!(cmd.limit_price, Some(Money::new(dec!(150.00))));
        // DAY is the default time in force.
        assert_eq!(cmd.time_in_force, TimeInForce::Day);
    }

    #[test]
    fn order_request_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "account_id": "acct-1",
            "symbol": "MSFT",
            "order_type": "MARKET",
            "side": "SELL",
            "quantity": "25"
        }"#;

        let request: OrderRequest = serde_json::from_str(json).unwrap();
        assert!(request.limit_price.is_none());
        assert!(request.time_in_force.is_none());
    }

    #[test]
    fn amend_request_into_amendment() {
        let request = AmendRequest {
            quantity: Some(dec!(50)),
            price: None,
        };
        let amendment = request.into_amendment();
        assert_eq!(amendment.quantity, Some(Quantity::from_i64(50)));
        assert!(amendment.price.is_none());
    }

    #[test]
    fn empty_amend_request() {
        let request: AmendRequest = serde_json::from_str("{}").unwrap();
        assert!(request.into_amendment().is_empty());
    }
}
