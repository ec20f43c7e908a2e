//! Engine events
//!
//! Immutable records appended by every state-changing operation, kept in
//! an in-process log for the read API and downstream consumers.

use serde::{Deserialize, Serialize};
use types::ids::{OrderId, TraderId};
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::token::{SettlementAddress, Symbol};

/// Event emitted by a committed exchange operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    TokenRegistered {
        symbol: Symbol,
        settlement_address: SettlementAddress,
    },
    DepositConfirmed {
        trader: TraderId,
        symbol: Symbol,
        amount: Quantity,
        new_balance: Quantity,
    },
    WithdrawalCompleted {
        trader: TraderId,
        symbol: Symbol,
        amount: Quantity,
        new_balance: Quantity,
    },
    OrderPlaced {
        order_id: OrderId,
        trader: TraderId,
        symbol: Symbol,
        side: Side,
        price: Price,
        amount: Quantity,
    },
    TradeExecuted {
        sequence: u64,
        symbol: Symbol,
        maker_order: OrderId,
        price: Price,
        quantity: Quantity,
    },
}
