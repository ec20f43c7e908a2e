//! Executed trade records
//!
//! One record per matched chunk of a market order. The log is append-only
//! audit history; trades settle instantly inside the ledger, so there is
//! no separate settlement state to track.

use serde::{Deserialize, Serialize};

use crate::ids::{OrderId, TraderId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use crate::token::Symbol;

/// An atomic exchange between a resting maker order and a market taker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Global monotonic sequence across all symbols.
    pub sequence: u64,
    pub symbol: Symbol,
    /// The resting limit order that was hit. Market orders are ephemeral
    /// and have no id of their own.
    pub maker_order: OrderId,
    pub maker: TraderId,
    pub taker: TraderId,
    /// Side from the taker's perspective.
    pub side: Side,
    /// Execution price (the maker's limit price).
    pub price: Price,
    pub quantity: Quantity,
    /// Unix nanos at execution.
    pub executed_at: i64,
}

impl Trade {
    /// Create a new trade record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        symbol: Symbol,
        maker_order: OrderId,
        maker: TraderId,
        taker: TraderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        executed_at: i64,
    ) -> Self {
        Self {
            sequence,
            symbol,
            maker_order,
            maker,
            taker,
            side,
            price,
            quantity,
            executed_at,
        }
    }

    /// Quote value moved by this trade (price × quantity).
    pub fn value(&self) -> Option<Quantity> {
        self.quantity.checked_mul(self.price)
    }
}
