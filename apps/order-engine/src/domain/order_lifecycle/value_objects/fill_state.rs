//! Cumulative fill accounting for an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Fill;
use crate::domain::shared::{DomainError, Money, Quantity, Timestamp};

/// Running fill totals for a single order.
///
/// Maintains the invariants:
/// - `filled_qty <= order_qty` (a violating fill is rejected, never clamped)
/// - `avg_price` is present if and only if `filled_qty > 0`
///
/// The average price is the quantity-weighted mean over every applied fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillState {
    order_qty: Quantity,
    filled_qty: Quantity,
    avg_price: Option<Money>,
    fills: Vec<Fill>,
    first_fill_at: Option<Timestamp>,
}

impl FillState {
    /// Create fill state for a freshly accepted order.
    #[must_use]
    pub fn new(order_qty: Quantity) -> Self {
        Self {
            order_qty,
            filled_qty: Quantity::ZERO,
            avg_price: None,
            fills: Vec::new(),
            first_fill_at: None,
        }
    }

    /// Total requested quantity.
    #[must_use]
    pub fn order_qty(&self) -> Quantity {
        self.order_qty
    }

    /// Cumulative filled quantity.
    #[must_use]
    pub fn filled_qty(&self) -> Quantity {
        self.filled_qty
    }

    /// Quantity still open for execution.
    #[must_use]
    pub fn remaining_qty(&self) -> Quantity {
        self.order_qty - self.filled_qty
    }

    /// Quantity-weighted average fill price, absent until the first fill.
    #[must_use]
    pub fn avg_price(&self) -> Option<Money> {
        self.avg_price
    }

    /// Individual fills applied so far, in arrival order.
    #[must_use]
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Timestamp of the first fill, if any.
    #[must_use]
    pub fn first_fill_at(&self) -> Option<Timestamp> {
        self.first_fill_at
    }

    /// True once the full order quantity has been executed.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled_qty >= self.order_qty
    }

    /// Apply an execution fill.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the fill would push the cumulative
    /// quantity past the order quantity.
    pub fn apply(&mut self, fill: Fill) -> Result<(), DomainError> {
        if fill.quantity > self.remaining_qty() {
            return Err(DomainError::InvariantViolation {
                aggregate: "Order".to_string(),
                invariant: "filled_qty <= order_qty".to_string(),
                state: format!(
                    "fill_qty={}, remaining_qty={}",
                    fill.quantity,
                    self.remaining_qty()
                ),
            });
        }

        let new_filled = self.filled_qty + fill.quantity;
        let prior_notional = self
            .avg_price
            .map_or(Decimal::ZERO, |p| p.amount() * self.filled_qty.amount());
        let fill_notional = fill.price.amount() * fill.quantity.amount();

        if new_filled.amount() > Decimal::ZERO {
            self.avg_price = Some(Money::new(
                (prior_notional + fill_notional) / new_filled.amount(),
            ));
        }

        self.filled_qty = new_filled;
        if self.first_fill_at.is_none() {
            self.first_fill_at = Some(fill.timestamp);
        }
        self.fills.push(fill);

        Ok(())
    }

    /// Replace the order quantity (amendment before any execution).
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if any quantity has already filled.
    pub fn set_order_qty(&mut self, order_qty: Quantity) -> Result<(), DomainError> {
        if !self.filled_qty.is_zero() {
            return Err(DomainError::InvariantViolation {
                aggregate: "Order".to_string(),
                invariant: "quantity amendments require zero fills".to_string(),
                state: format!("filled_qty={}", self.filled_qty),
            });
        }
        self.order_qty = order_qty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fill(qty: i64, price: Decimal) -> Fill {
        Fill::new(Quantity::from_i64(qty), Money::new(price), Timestamp::now())
    }

    #[test]
    fn new_state_is_unfilled() {
        let state = FillState::new(Quantity::from_i64(100));
        assert_eq!(state.filled_qty(), Quantity::ZERO);
        assert_eq!(state.remaining_qty(), Quantity::from_i64(100));
        assert!(state.avg_price().is_none());
        assert!(state.first_fill_at().is_none());
        assert!(!state.is_filled());
    }

    #[test]
    fn single_fill_sets_average_to_fill_price() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(100, dec!(10.00))).unwrap();

        assert!(state.is_filled());
        assert_eq!(state.avg_price(), Some(Money::new(dec!(10.00))));
        assert_eq!(state.remaining_qty(), Quantity::ZERO);
    }

    #[test]
    fn weighted_average_across_fills() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(40, dec!(150.00))).unwrap();
        assert_eq!(state.avg_price(), Some(Money::new(dec!(150.00))));

        // (150.00 * 40 + 151.00 * 60) / 100 = 150.60
        state.apply(fill(60, dec!(151.00))).unwrap();
        assert_eq!(state.avg_price(), Some(Money::new(dec!(150.60))));
        assert!(state.is_filled());
    }

    #[test]
    fn remaining_shrinks_with_each_fill() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(30, dec!(10))).unwrap();
        assert_eq!(state.filled_qty(), Quantity::from_i64(30));
        assert_eq!(state.remaining_qty(), Quantity::from_i64(70));

        state.apply(fill(50, dec!(10))).unwrap();
        assert_eq!(state.remaining_qty(), Quantity::from_i64(20));
        assert_eq!(state.fills().len(), 2);
    }

    #[test]
    fn overfill_is_rejected_not_clamped() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(80, dec!(10))).unwrap();

        let err = state.apply(fill(30, dec!(10))).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation { .. }));

        // State unchanged by the rejected fill.
        assert_eq!(state.filled_qty(), Quantity::from_i64(80));
        assert_eq!(state.fills().len(), 1);
    }

    #[test]
    fn first_fill_timestamp_is_sticky() {
        let mut state = FillState::new(Quantity::from_i64(10));
        let t1 = Timestamp::parse("2026-03-01T10:00:00Z").unwrap();
        let t2 = Timestamp::parse("2026-03-01T11:00:00Z").unwrap();

        state
            .apply(Fill::new(Quantity::from_i64(4), Money::new(dec!(5)), t1))
            .unwrap();
        state
            .apply(Fill::new(Quantity::from_i64(6), Money::new(dec!(5)), t2))
            .unwrap();

        assert_eq!(state.first_fill_at(), Some(t1));
    }

    #[test]
    fn set_order_qty_before_fills() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.set_order_qty(Quantity::from_i64(250)).unwrap();
        assert_eq!(state.order_qty(), Quantity::from_i64(250));
        assert_eq!(state.remaining_qty(), Quantity::from_i64(250));
    }

    #[test]
    fn set_order_qty_after_fill_fails() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(10, dec!(10))).unwrap();
        assert!(state.set_order_qty(Quantity::from_i64(250)).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let mut state = FillState::new(Quantity::from_i64(100));
        state.apply(fill(40, dec!(9.95))).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let parsed: FillState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
