//! Order aggregate root.
//!
//! Owns the full lifecycle of a single order: acceptance, amendment,
//! cancellation, rejection, and fill accounting. All status changes go
//! through the `OrderStateMachine` transition table.

use serde::{Deserialize, Serialize};

use super::super::errors::OrderError;
use super::super::services::OrderStateMachine;
use super::super::value_objects::{
    Fill, FillState, OrderCode, OrderSide, OrderStatus, OrderType, TimeInForce,
};
use crate::domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Account placing the order.
    pub account_id: AccountId,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order type.
    pub order_type: OrderType,
    /// Order side.
    pub side: OrderSide,
    /// Quantity to trade.
    pub quantity: Quantity,
    /// Limit price (required for LIMIT/STOP_LIMIT, absent for MARKET).
    pub limit_price: Option<Money>,
    /// Time in force.
    pub time_in_force: TimeInForce,
}

impl CreateOrderCommand {
    /// Validate structural legality of the command.
    ///
    /// Compliance-style checks (symbol, quantity) belong to the validation
    /// gate; this covers price/type consistency only.
    ///
    /// # Errors
    ///
    /// Returns error if the price is missing, forbidden, or non-positive for
    /// the given order type.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.order_type.requires_limit_price() && self.limit_price.is_none() {
            return Err(OrderError::InvalidParameters {
                field: "limit_price".to_string(),
                message: format!("Limit price required for {} orders", self.order_type),
            });
        }

        if self.order_type == OrderType::Market && self.limit_price.is_some() {
            return Err(OrderError::InvalidParameters {
                field: "limit_price".to_string(),
                message: "Market orders must not carry a limit price".to_string(),
            });
        }

        if let Some(price) = &self.limit_price {
            price
                .validate_as_price()
                .map_err(|e| OrderError::InvalidParameters {
                    field: "limit_price".to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }
}

/// Amendment to a pending order. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderAmendment {
    /// New quantity, if amending.
    pub quantity: Option<Quantity>,
    /// New limit price, if amending.
    pub price: Option<Money>,
}

impl OrderAmendment {
    /// True when the amendment changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }
}

/// Order aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    code: OrderCode,
    account_id: AccountId,
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    limit_price: Option<Money>,
    time_in_force: TimeInForce,
    status: OrderStatus,
    fill_state: FillState,
    created_at: Timestamp,
    updated_at: Timestamp,
    executed_at: Option<Timestamp>,
}

impl Order {
    /// Create a new order in PENDING status.
    ///
    /// The caller is expected to have run the validation gate already; this
    /// enforces structural legality and allocates the order code.
    ///
    /// # Errors
    ///
    /// Returns error if the command is structurally invalid.
    pub fn new(cmd: CreateOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::generate(),
            code: OrderCode::generate(),
            account_id: cmd.account_id,
            symbol: cmd.symbol,
            side: cmd.side,
            order_type: cmd.order_type,
            limit_price: cmd.limit_price,
            time_in_force: cmd.time_in_force,
            status: OrderStatus::Pending,
            fill_state: FillState::new(cmd.quantity),
            created_at: now,
            updated_at: now,
            executed_at: None,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Internal record id.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Externally visible order code.
    #[must_use]
    pub const fn code(&self) -> &OrderCode {
        &self.code
    }

    /// Owning account.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Requested quantity.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.fill_state.order_qty()
    }

    /// Limit price, if the order carries one.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Money> {
        self.limit_price
    }

    /// Time in force.
    #[must_use]
    pub const fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Cumulative filled quantity.
    #[must_use]
    pub fn filled_quantity(&self) -> Quantity {
        self.fill_state.filled_qty()
    }

    /// Quantity still open.
    #[must_use]
    pub fn remaining_quantity(&self) -> Quantity {
        self.fill_state.remaining_qty()
    }

    /// Quantity-weighted average fill price; absent until the first fill.
    #[must_use]
    pub fn average_fill_price(&self) -> Option<Money> {
        self.fill_state.avg_price()
    }

    /// Fills applied so far.
    #[must_use]
    pub fn fills(&self) -> &[Fill] {
        self.fill_state.fills()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Timestamp of the first execution, if any.
    #[must_use]
    pub const fn executed_at(&self) -> Option<Timestamp> {
        self.executed_at
    }

    // ========================================================================
    // State transitions
    // ========================================================================

    /// Amend price and/or quantity. Legal only while PENDING.
    ///
    /// The validation gate is deliberately not re-run here; see DESIGN.md.
    ///
    /// # Errors
    ///
    /// Returns `IllegalStateTransition` outside PENDING, or
    /// `InvalidParameters` for a non-positive amended value.
    pub fn amend(&mut self, amendment: OrderAmendment) -> Result<(), OrderError> {
        if !self.status.is_amendable() {
            return Err(self.illegal("amend"));
        }

        if let Some(quantity) = amendment.quantity {
            quantity
                .validate_for_order()
                .map_err(|e| OrderError::InvalidParameters {
                    field: "quantity".to_string(),
                    message: e.to_string(),
                })?;
            self.fill_state
                .set_order_qty(quantity)
                .map_err(|e| OrderError::InvalidParameters {
                    field: "quantity".to_string(),
                    message: e.to_string(),
                })?;
        }

        if let Some(price) = amendment.price {
            price
                .validate_as_price()
                .map_err(|e| OrderError::InvalidParameters {
                    field: "price".to_string(),
                    message: e.to_string(),
                })?;
            self.limit_price = Some(price);
        }

        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel the order. Legal from PENDING and PARTIALLY_FILLED.
    ///
    /// Cancellation is a terminal status, not a delete; fill state survives.
    ///
    /// # Errors
    ///
    /// Returns `IllegalStateTransition` from FILLED, CANCELLED, or REJECTED.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !OrderStateMachine::is_valid_transition(self.status, OrderStatus::Cancelled) {
            return Err(self.illegal("cancel"));
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reject the order (venue or post-acceptance compliance feedback).
    /// Legal only from PENDING.
    ///
    /// # Errors
    ///
    /// Returns `IllegalStateTransition` from any other status.
    pub fn reject(&mut self) -> Result<(), OrderError> {
        if !OrderStateMachine::is_valid_transition(self.status, OrderStatus::Rejected) {
            return Err(self.illegal("reject"));
        }

        self.status = OrderStatus::Rejected;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Apply an execution fill.
    ///
    /// Moves to FILLED exactly when the cumulative quantity reaches the
    /// order quantity, otherwise to PARTIALLY_FILLED. The first fill stamps
    /// `executed_at`.
    ///
    /// # Errors
    ///
    /// Returns `IllegalStateTransition` in a terminal status, or `OverFill`
    /// if the fill exceeds the remaining quantity.
    pub fn apply_fill(&mut self, fill: Fill) -> Result<(), OrderError> {
        if !self.status.can_fill() {
            return Err(self.illegal("fill"));
        }

        if !fill.quantity.is_positive() {
            return Err(OrderError::InvalidParameters {
                field: "fill_quantity".to_string(),
                message: "Fill quantity must be positive".to_string(),
            });
        }
        fill.price
            .validate_as_price()
            .map_err(|e| OrderError::InvalidParameters {
                field: "fill_price".to_string(),
                message: e.to_string(),
            })?;

        let remaining = self.fill_state.remaining_qty();
        if fill.quantity > remaining {
            return Err(OrderError::OverFill {
                order_code: self.code.to_string(),
                fill_qty: fill.quantity.to_string(),
                remaining_qty: remaining.to_string(),
            });
        }

        let timestamp = fill.timestamp;
        self.fill_state
            .apply(fill)
            .map_err(|e| OrderError::InvalidParameters {
                field: "fill".to_string(),
                message: e.to_string(),
            })?;

        self.status = if self.fill_state.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };

        if self.executed_at.is_none() {
            self.executed_at = Some(timestamp);
        }
        self.updated_at = Timestamp::now();

        Ok(())
    }

    fn illegal(&self, operation: &str) -> OrderError {
        OrderError::IllegalStateTransition {
            order_code: self.code.to_string(),
            status: self.status,
            operation: operation.to_string(),
        }
    }
}
