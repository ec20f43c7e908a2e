//! Per-symbol order book
//!
//! Two priority-ordered sequences of resting limit orders. Bids sort by
//! price descending, asks by price ascending; ties break by ascending
//! order id, so the earlier order wins. Orders are never removed: a
//! fully-filled order stays in place for audit history and the query API,
//! and matching skips it.

use types::order::{Order, Side};

/// Order book for a single tradeable symbol.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: Vec<Order>,
    asks: Vec<Order>,
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order at its priority position.
    ///
    /// New orders carry the highest id so far, so among equal prices the
    /// insertion point is after every existing order at that price.
    pub fn insert(&mut self, order: Order) {
        match order.side {
            Side::Buy => {
                let at = self.bids.partition_point(|o| o.price >= order.price);
                self.bids.insert(at, order);
            }
            Side::Sell => {
                let at = self.asks.partition_point(|o| o.price <= order.price);
                self.asks.insert(at, order);
            }
        }
    }

    /// The full ordered sequence for one side, filled orders included.
    pub fn orders(&self, side: Side) -> &[Order] {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn orders_mut(&mut self, side: Side) -> &mut [Order] {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
