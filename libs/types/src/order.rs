//! Limit order types
//!
//! Orders are append-only book entries: everything except the cumulative
//! fill is frozen at creation. A fully-filled order stays queryable for
//! audit history and is simply skipped by future matching.

use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, TraderId};
use crate::numeric::{Price, Quantity};
use crate::token::Symbol;

/// Order side (buyer or seller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// A resting limit order.
///
/// Invariant: `filled` only ever advances and never exceeds `amount`;
/// all other fields are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader: TraderId,
    pub symbol: Symbol,
    pub side: Side,
    pub price: Price,
    pub amount: Quantity,
    pub filled: Quantity,
    /// Unix nanos at creation.
    pub created_at: i64,
}

impl Order {
    /// Create a new unfilled order.
    pub fn new(
        id: OrderId,
        trader: TraderId,
        symbol: Symbol,
        side: Side,
        price: Price,
        amount: Quantity,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            trader,
            symbol,
            side,
            price,
            amount,
            filled: Quantity::zero(),
            created_at,
        }
    }

    /// Quantity still available to match.
    pub fn remaining(&self) -> Quantity {
        self.amount.checked_sub(self.filled).unwrap_or_else(Quantity::zero)
    }

    /// Check if the order is fully consumed.
    pub fn is_filled(&self) -> bool {
        self.filled >= self.amount
    }

    /// Advance the cumulative fill.
    ///
    /// # Panics
    /// Panics if the fill would exceed the order amount; callers must
    /// size fills against [`Order::remaining`].
    pub fn fill(&mut self, quantity: Quantity) {
        let new_filled = self
            .filled
            .checked_add(quantity)
            .filter(|f| *f <= self.amount);
        match new_filled {
            Some(f) => self.filled = f,
            None => panic!("fill would exceed order amount"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order(amount: u64) -> Order {
        Order::new(
            OrderId::from_u64(1),
            TraderId::new(),
            Symbol::new("REP").unwrap(),
            Side::Buy,
            Price::from_u64(10),
            Quantity::from_u64(amount),
            1_708_123_456_789_000_000,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_new_order_is_unfilled() {
        let order = sample_order(10);
        assert!(order.filled.is_zero());
        assert_eq!(order.remaining(), Quantity::from_u64(10));
        assert!(!order.is_filled());
    }

    #[test]
    fn test_partial_then_full_fill() {
        let mut order = sample_order(10);

        order.fill(Quantity::from_u64(4));
        assert_eq!(order.filled, Quantity::from_u64(4));
        assert_eq!(order.remaining(), Quantity::from_u64(6));
        assert!(!order.is_filled());

        order.fill(Quantity::from_u64(6));
        assert!(order.is_filled());
        assert!(order.remaining().is_zero());
    }

    #[test]
    #[should_panic(expected = "fill would exceed order amount")]
    fn test_overfill_panics() {
        let mut order = sample_order(10);
        order.fill(Quantity::from_u64(11));
    }

    #[test]
    fn test_order_serialization() {
        let order = sample_order(5);
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }

    #[test]
    fn test_side_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"SELL\"");
    }
}
