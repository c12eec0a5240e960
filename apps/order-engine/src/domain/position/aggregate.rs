//! Position aggregate root.
//!
//! One position per (account, symbol). The signed quantity encodes
//! direction: positive long, negative short, zero flat. Fills fold into the
//! position with weighted-average entry pricing and realize P&L on the
//! closed portion of opposite-direction fills.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::OrderSide;
use crate::domain::shared::{AccountId, Money, Quantity, Symbol, Timestamp};

/// Derived valuation of a position at a given market price.
///
/// The market price is supplied externally; the core never sources prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMark {
    /// quantity x market price.
    pub market_value: Money,
    /// quantity x (market price - average entry price).
    pub unrealized_pnl: Money,
}

impl PositionMark {
    /// Pure valuation function.
    #[must_use]
    pub fn compute(quantity: Quantity, average_price: Money, market_price: Money) -> Self {
        Self {
            market_value: Money::new(quantity.amount() * market_price.amount()),
            unrealized_pnl: Money::new(
                quantity.amount() * (market_price.amount() - average_price.amount()),
            ),
        }
    }
}

/// Position aggregate root, keyed by (account, symbol).
///
/// A fully closed position rests at zero quantity with its realized P&L
/// retained; rows are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    account_id: AccountId,
    symbol: Symbol,
    quantity: Quantity,
    average_price: Money,
    realized_pnl: Money,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Position {
    /// Create a flat position. Called lazily on the first fill for a new
    /// (account, symbol) pair.
    #[must_use]
    pub fn new(account_id: AccountId, symbol: Symbol) -> Self {
        let now = Timestamp::now();
        Self {
            account_id,
            symbol,
            quantity: Quantity::ZERO,
            average_price: Money::ZERO,
            realized_pnl: Money::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Owning account.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Instrument symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Signed quantity: positive long, negative short, zero flat.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Average entry price; zero while flat.
    #[must_use]
    pub const fn average_price(&self) -> Money {
        self.average_price
    }

    /// P&L realized across all closing fills.
    #[must_use]
    pub const fn realized_pnl(&self) -> Money {
        self.realized_pnl
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

    /// True when the position holds no quantity.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.quantity.is_zero()
    }

    /// True for a long position.
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.quantity.is_positive()
    }

    /// True for a short position.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.quantity.is_negative()
    }

    /// Fold an execution fill into the position.
    ///
    /// - Same-direction fills grow the position and re-average the entry
    ///   price by quantity weight.
    /// - Opposite-direction fills realize
    ///   `closed_qty x (fill_price - avg_price) x sign(position)` on the
    ///   closed portion. A fill larger than the open quantity flips the
    ///   position; the remainder opens at the fill price.
    pub fn apply_fill(&mut self, side: OrderSide, quantity: Quantity, price: Money) {
        let signed_fill = Quantity::new(quantity.amount() * side.sign());

        if self.quantity.is_zero() {
            // Opening fill on a flat position.
            self.quantity = signed_fill;
            self.average_price = price;
        } else if self.quantity.signum() == signed_fill.signum() {
            // Increasing fill: re-average entry price by quantity weight.
            let new_qty = self.quantity + signed_fill;
            let weighted = self.average_price.amount() * self.quantity.abs().amount()
                + price.amount() * signed_fill.abs().amount();
            self.average_price = Money::new(weighted / new_qty.abs().amount());
            self.quantity = new_qty;
        } else {
            // Reducing or flipping fill: realize P&L on the closed portion.
            let closed = self.quantity.abs().min(signed_fill.abs());
            let direction = self.quantity.signum();
            let realized =
                closed.amount() * (price.amount() - self.average_price.amount()) * direction;
            self.realized_pnl = self.realized_pnl + Money::new(realized);

            let new_qty = self.quantity + signed_fill;
            if new_qty.is_zero() {
                self.average_price = Money::ZERO;
            } else if new_qty.signum() != direction {
                // Flipped: the overshoot opens a fresh position at the fill
                // price.
                self.average_price = price;
            }
            self.quantity = new_qty;
        }

        self.updated_at = Timestamp::now();
    }

    /// Valuation against an externally supplied market price.
    #[must_use]
    pub fn mark(&self, market_price: Money) -> PositionMark {
        PositionMark::compute(self.quantity, self.average_price, market_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position() -> Position {
        Position::new(AccountId::new("acct-1"), Symbol::new("AAPL"))
    }

    fn qty(n: i64) -> Quantity {
        Quantity::from_i64(n)
    }

    fn money(d: Decimal) -> Money {
        Money::new(d)
    }

    #[test]
    fn new_position_is_flat() {
        let pos = position();
        assert!(pos.is_flat());
        assert_eq!(pos.average_price(), Money::ZERO);
        assert_eq!(pos.realized_pnl(), Money::ZERO);
    }

    #[test]
    fn opening_buy_goes_long() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));

        assert!(pos.is_long());
        assert_eq!(pos.quantity(), qty(100));
        assert_eq!(pos.average_price(), money(dec!(10.00)));
        assert_eq!(pos.realized_pnl(), Money::ZERO);
    }

    #[test]
    fn opening_sell_goes_short() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Sell, qty(50), money(dec!(20.00)));

        assert!(pos.is_short());
        assert_eq!(pos.quantity(), qty(-50));
        assert_eq!(pos.average_price(), money(dec!(20.00)));
    }

    #[test]
    fn same_direction_fill_reaverages() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(12.00)));

        assert_eq!(pos.quantity(), qty(200));
        assert_eq!(pos.average_price(), money(dec!(11.00)));
        assert_eq!(pos.realized_pnl(), Money::ZERO);
    }

    #[test]
    fn short_increase_reaverages() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Sell, qty(30), money(dec!(10.00)));
        pos.apply_fill(OrderSide::Sell, qty(10), money(dec!(14.00)));

        assert_eq!(pos.quantity(), qty(-40));
        assert_eq!(pos.average_price(), money(dec!(11.00)));
    }

    #[test]
    fn reducing_fill_realizes_pnl() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));
        pos.apply_fill(OrderSide::Sell, qty(40), money(dec!(12.00)));

        // 40 x (12 - 10) x 1 = 80
        assert_eq!(pos.quantity(), qty(60));
        assert_eq!(pos.average_price(), money(dec!(10.00)));
        assert_eq!(pos.realized_pnl(), money(dec!(80.00)));
    }

    #[test]
    fn closing_to_flat_resets_average() {
        // The full scenario: BUY 100 @ 10, SELL 40 @ 12, SELL 60 @ 8.
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));
        pos.apply_fill(OrderSide::Sell, qty(40), money(dec!(12.00)));
        pos.apply_fill(OrderSide::Sell, qty(60), money(dec!(8.00)));

        // 80 + 60 x (8 - 10) = 80 - 120 = -40; net realized 40.
        assert!(pos.is_flat());
        assert_eq!(pos.average_price(), Money::ZERO);
        assert_eq!(pos.realized_pnl(), money(dec!(40.00)));
    }

    #[test]
    fn overshooting_fill_flips_direction() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));
        pos.apply_fill(OrderSide::Sell, qty(150), money(dec!(11.00)));

        // Closed 100 at +1 each; remainder opens 50 short at 11.
        assert_eq!(pos.quantity(), qty(-50));
        assert_eq!(pos.average_price(), money(dec!(11.00)));
        assert_eq!(pos.realized_pnl(), money(dec!(100.00)));
    }

    #[test]
    fn short_cover_realizes_pnl() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Sell, qty(100), money(dec!(20.00)));
        pos.apply_fill(OrderSide::Buy, qty(60), money(dec!(18.00)));

        // 60 x (18 - 20) x (-1) = 120
        assert_eq!(pos.quantity(), qty(-40));
        assert_eq!(pos.average_price(), money(dec!(20.00)));
        assert_eq!(pos.realized_pnl(), money(dec!(120.00)));
    }

    #[test]
    fn reopening_after_flat_starts_fresh() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(10), money(dec!(5.00)));
        pos.apply_fill(OrderSide::Sell, qty(10), money(dec!(6.00)));
        assert!(pos.is_flat());

        pos.apply_fill(OrderSide::Buy, qty(20), money(dec!(7.00)));
        assert_eq!(pos.quantity(), qty(20));
        assert_eq!(pos.average_price(), money(dec!(7.00)));
        // Realized P&L from the earlier round trip is retained.
        assert_eq!(pos.realized_pnl(), money(dec!(10.00)));
    }

    #[test]
    fn mark_long_position() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(100), money(dec!(10.00)));

        let mark = pos.mark(money(dec!(12.50)));
        assert_eq!(mark.market_value, money(dec!(1250.00)));
        assert_eq!(mark.unrealized_pnl, money(dec!(250.00)));
    }

    #[test]
    fn mark_short_position() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Sell, qty(100), money(dec!(10.00)));

        let mark = pos.mark(money(dec!(8.00)));
        assert_eq!(mark.market_value, money(dec!(-800.00)));
        // Short 100 from 10, marked at 8: +200 unrealized.
        assert_eq!(mark.unrealized_pnl, money(dec!(200.00)));
    }

    #[test]
    fn mark_flat_position_is_zero() {
        let pos = position();
        let mark = pos.mark(money(dec!(99.99)));
        assert_eq!(mark.market_value, Money::ZERO);
        assert_eq!(mark.unrealized_pnl, Money::ZERO);
    }

    #[test]
    fn compute_is_pure() {
        let mark = PositionMark::compute(qty(10), money(dec!(4.00)), money(dec!(5.50)));
        assert_eq!(mark.market_value, money(dec!(55.00)));
        assert_eq!(mark.unrealized_pnl, money(dec!(15.00)));
    }

    #[test]
    fn serde_roundtrip() {
        let mut pos = position();
        pos.apply_fill(OrderSide::Buy, qty(10), money(dec!(3.33)));

        let json = serde_json::to_string(&pos).unwrap();
        let parsed: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pos);
    }
}
