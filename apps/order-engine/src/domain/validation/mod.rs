//! Pre-trade validation gate.
//!
//! An ordered chain of [`ValidationRule`]s runs before an order is accepted.
//! The default chain checks symbol well-formedness and quantity positivity;
//! richer compliance rules (trading hours, position limits, restricted lists,
//! suitability) append to the chain without touching the lifecycle manager.

use std::fmt;

use tracing::debug;

use crate::domain::order_lifecycle::CreateOrderCommand;

/// Pre-trade rejection. User-correctable; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Symbol missing or malformed.
    InvalidSymbol {
        /// Why the symbol was rejected.
        reason: String,
    },

    /// Quantity missing, zero, negative, or over limit.
    InvalidQuantity {
        /// Why the quantity was rejected.
        reason: String,
    },

    /// A custom rule in the chain rejected the order.
    RuleRejected {
        /// Name of the rejecting rule.
        rule: String,
        /// Why the order was rejected.
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymbol { reason } => write!(f, "Invalid symbol: {reason}"),
            Self::InvalidQuantity { reason } => write!(f, "Invalid quantity: {reason}"),
            Self::RuleRejected { rule, reason } => {
                write!(f, "Rejected by rule '{rule}': {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A single pre-trade check.
///
/// Implementations must be order-independent of each other; the gate runs
/// them in registration order and stops at the first failure.
pub trait ValidationRule: Send + Sync {
    /// Rule name, used in logs and rejection messages.
    fn name(&self) -> &str;

    /// Check a create-order command.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason if the command fails this rule.
    fn check(&self, command: &CreateOrderCommand) -> Result<(), ValidationError>;
}

/// Rejects blank or malformed symbols.
#[derive(Debug, Default)]
pub struct SymbolRule;

impl ValidationRule for SymbolRule {
    fn name(&self) -> &str {
        "symbol"
    }

    fn check(&self, command: &CreateOrderCommand) -> Result<(), ValidationError> {
        command
            .symbol
            .validate()
            .map_err(|e| ValidationError::InvalidSymbol {
                reason: e.to_string(),
            })
    }
}

/// Rejects non-positive or oversized quantities.
#[derive(Debug, Default)]
pub struct QuantityRule;

impl ValidationRule for QuantityRule {
    fn name(&self) -> &str {
        "quantity"
    }

    fn check(&self, command: &CreateOrderCommand) -> Result<(), ValidationError> {
        command
            .quantity
            .validate_for_order()
            .map_err(|e| ValidationError::InvalidQuantity {
                reason: e.to_string(),
            })
    }
}

/// Ordered pre-trade check chain with a global enable switch.
pub struct ValidationGate {
    rules: Vec<Box<dyn ValidationRule>>,
    enabled: bool,
}

impl ValidationGate {
    /// Create a gate with the default rule chain.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            rules: vec![Box::new(SymbolRule), Box::new(QuantityRule)],
            enabled,
        }
    }

    /// Create a gate with no rules (for composing a custom chain).
    #[must_use]
    pub fn empty(enabled: bool) -> Self {
        Self {
            rules: Vec::new(),
            enabled,
        }
    }

    /// Append a rule to the end of the chain.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Whether the gate is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run every rule in order; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the first rule rejection, or nothing when the gate is
    /// disabled.
    pub fn validate(&self, command: &CreateOrderCommand) -> Result<(), ValidationError> {
        if !self.enabled {
            debug!("validation gate disabled, skipping checks");
            return Ok(());
        }

        for rule in &self.rules {
            rule.check(command)?;
        }
        Ok(())
    }
}

impl Default for ValidationGate {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::{OrderSide, OrderType, TimeInForce};
    use crate::domain::shared::{AccountId, Quantity, Symbol};
    use rust_decimal_macros::dec;

    fn command(symbol: &str, qty: i64) -> CreateOrderCommand {
        CreateOrderCommand {
            account_id: AccountId::new("acct-1"),
            symbol: Symbol::new(symbol),
            order_type: OrderType::Market,
            side: OrderSide::Buy,
            quantity: Quantity::from_i64(qty),
            limit_price: None,
            time_in_force: TimeInForce::Day,
        }
    }

    #[test]
    fn default_gate_accepts_valid_command() {
        let gate = ValidationGate::default();
        assert!(gate.validate(&command("AAPL", 100)).is_ok());
    }

    #[test]
    fn blank_symbol_rejected() {
        let gate = ValidationGate::default();
        let err = gate.validate(&command("   ", 100)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSymbol { .. }));
    }

    #[test]
    fn non_positive_quantity_rejected() {
        let gate = ValidationGate::default();
        let err = gate.validate(&command("AAPL", 0)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidQuantity { .. }));

        let err = gate.validate(&command("AAPL", -5)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidQuantity { .. }));
    }

    #[test]
    fn symbol_rule_runs_before_quantity_rule() {
        let gate = ValidationGate::default();
        // Both fields invalid; the symbol rule is registered first.
        let err = gate.validate(&command("", 0)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSymbol { .. }));
    }

    #[test]
    fn disabled_gate_bypasses_all_checks() {
        let gate = ValidationGate::new(false);
        assert!(!gate.is_enabled());
        assert!(gate.validate(&command("", -1)).is_ok());
    }

    #[test]
    fn appended_rule_runs_after_defaults() {
        struct RestrictedList;

        impl ValidationRule for RestrictedList {
            fn name(&self) -> &str {
                "restricted-list"
            }

            fn check(&self, command: &CreateOrderCommand) -> Result<(), ValidationError> {
                if command.symbol.as_str() == "BADCO" {
                    return Err(ValidationError::RuleRejected {
                        rule: self.name().to_string(),
                        reason: "symbol is restricted".to_string(),
                    });
                }
                Ok(())
            }
        }

        let gate = ValidationGate::default().with_rule(Box::new(RestrictedList));

        assert!(gate.validate(&command("AAPL", 10)).is_ok());

        let err = gate.validate(&command("BADCO", 10)).unwrap_err();
        assert!(matches!(err, ValidationError::RuleRejected { .. }));
        assert!(err.to_string().contains("restricted"));
    }

    #[test]
    fn fractional_quantity_accepted() {
        let gate = ValidationGate::default();
        let mut cmd = command("AAPL", 1);
        cmd.quantity = Quantity::new(dec!(0.25));
        assert!(gate.validate(&cmd).is_ok());
    }
}
