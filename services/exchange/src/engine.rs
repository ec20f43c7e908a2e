//! Exchange façade
//!
//! The public operation surface. Every operation validates before it
//! mutates and runs to completion as one serialized transaction: callers
//! hold `&mut Exchange`, so no two operations can interleave, and a
//! failing operation leaves no trace. Settlement legs that fail after a
//! ledger mutation force a compensating rollback.

use std::collections::HashMap;

use chrono::Utc;
use settlement::SettlementGateway;
use tracing::{debug, info};
use types::errors::ExchangeError;
use types::ids::{OrderId, TraderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::token::{SettlementAddress, Symbol, Token};
use types::trade::Trade;

use crate::book::OrderBook;
use crate::events::ExchangeEvent;
use crate::ledger::BalanceLedger;
use crate::matching;
use crate::registry::TokenRegistry;

/// The exchange engine: token registry, custodial ledger, per-symbol
/// order books, and the trade/event history, settling externally through
/// a [`SettlementGateway`].
pub struct Exchange<G: SettlementGateway> {
    registry: TokenRegistry,
    ledger: BalanceLedger,
    books: HashMap<Symbol, OrderBook>,
    trades: Vec<Trade>,
    events: Vec<ExchangeEvent>,
    next_order_id: u64,
    next_trade_sequence: u64,
    gateway: G,
}

impl<G: SettlementGateway> Exchange<G> {
    /// Create an engine with the given quote currency and gateway.
    pub fn new(quote: Token, gateway: G) -> Self {
        Self {
            registry: TokenRegistry::new(quote),
            ledger: BalanceLedger::new(),
            books: HashMap::new(),
            trades: Vec::new(),
            events: Vec::new(),
            next_order_id: 1,
            next_trade_sequence: 1,
            gateway,
        }
    }

    /// Register a tradeable token.
    pub fn register_token(
        &mut self,
        symbol: Symbol,
        settlement_address: SettlementAddress,
    ) -> Result<(), ExchangeError> {
        self.registry.register(symbol, settlement_address.clone())?;
        info!(%symbol, %settlement_address, "token registered");
        self.events.push(ExchangeEvent::TokenRegistered {
            symbol,
            settlement_address,
        });
        Ok(())
    }

    /// Deposit into custody. Pulls the external transfer first; the
    /// ledger is only credited once the gateway confirms.
    pub fn deposit(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<Quantity, ExchangeError> {
        if amount.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }
        let address = self.registry.resolve(symbol)?.settlement_address.clone();

        self.gateway.transfer_in(&address, trader, amount)?;
        let new_balance = match self.ledger.credit(trader, symbol, amount) {
            Ok(balance) => balance,
            Err(err) => {
                // Custody must not keep funds the ledger never credited
                let _ = self.gateway.transfer_out(&address, trader, amount);
                return Err(err);
            }
        };

        debug!(%trader, %symbol, %amount, %new_balance, "deposit confirmed");
        self.events.push(ExchangeEvent::DepositConfirmed {
            trader: *trader,
            symbol,
            amount,
            new_balance,
        });
        Ok(new_balance)
    }

    /// Withdraw from custody. Debits first, then releases externally; a
    /// failed release restores the debited balance.
    pub fn withdraw(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<Quantity, ExchangeError> {
        let address = self.registry.resolve(symbol)?.settlement_address.clone();

        let prior = self.ledger.balance_of(trader, symbol);
        let new_balance = self.ledger.debit(trader, symbol, amount)?;
        if let Err(err) = self.gateway.transfer_out(&address, trader, amount) {
            self.ledger.set_balance(trader, symbol, prior);
            return Err(err.into());
        }

        debug!(%trader, %symbol, %amount, %new_balance, "withdrawal completed");
        self.events.push(ExchangeEvent::WithdrawalCompleted {
            trader: *trader,
            symbol,
            amount,
            new_balance,
        });
        Ok(new_balance)
    }

    /// Place a resting limit order.
    ///
    /// Sufficiency is checked against the current ledger balance; resting
    /// orders do not lock funds. The order never matches on admission.
    pub fn place_limit_order(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
        price: Price,
        side: Side,
    ) -> Result<OrderId, ExchangeError> {
        self.registry.ensure_tradeable(symbol)?;
        let quote = self.registry.quote().symbol;

        match side {
            Side::Sell => {
                let available = self.ledger.balance_of(trader, symbol);
                if available < amount {
                    return Err(ExchangeError::InsufficientTokenBalance {
                        symbol,
                        required: amount,
                        available,
                    });
                }
            }
            Side::Buy => {
                let cost = amount.checked_mul(price).ok_or(ExchangeError::Overflow)?;
                let available = self.ledger.balance_of(trader, quote);
                if available < cost {
                    return Err(ExchangeError::InsufficientQuoteBalance {
                        required: cost,
                        available,
                    });
                }
            }
        }

        let id = OrderId::from_u64(self.next_order_id);
        self.next_order_id += 1;
        let order = Order::new(id, *trader, symbol, side, price, amount, now_nanos());
        self.books.entry(symbol).or_default().insert(order);

        info!(%id, %trader, %symbol, ?side, %price, %amount, "limit order resting");
        self.events.push(ExchangeEvent::OrderPlaced {
            order_id: id,
            trader: *trader,
            symbol,
            side,
            price,
            amount,
        });
        Ok(id)
    }

    /// Execute a market order against the opposite side of the book.
    ///
    /// Returns the total matched quantity; any remainder the book cannot
    /// satisfy is dropped. All chunks validate before anything commits.
    pub fn place_market_order(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
        side: Side,
    ) -> Result<Quantity, ExchangeError> {
        self.registry.ensure_tradeable(symbol)?;
        let quote = self.registry.quote().symbol;
        let executed_at = now_nanos();

        let opposite = self
            .books
            .get(&symbol)
            .map(|book| book.orders(side.opposite()))
            .unwrap_or(&[]);
        let plan =
            matching::plan_market_order(&self.ledger, opposite, trader, side, amount, symbol, quote)?;

        // Commit: the plan validated every mutation, so nothing below can
        // fail and leave partial state.
        for ((owner, asset), balance) in &plan.staged {
            self.ledger.set_balance(owner, *asset, *balance);
        }
        if let Some(book) = self.books.get_mut(&symbol) {
            let resting = book.orders_mut(side.opposite());
            for fill in &plan.fills {
                let maker_order = &mut resting[fill.index];
                maker_order.fill(fill.quantity);

                let sequence = self.next_trade_sequence;
                self.next_trade_sequence += 1;
                self.trades.push(Trade::new(
                    sequence,
                    symbol,
                    maker_order.id,
                    maker_order.trader,
                    *trader,
                    side,
                    maker_order.price,
                    fill.quantity,
                    executed_at,
                ));
                self.events.push(ExchangeEvent::TradeExecuted {
                    sequence,
                    symbol,
                    maker_order: maker_order.id,
                    price: maker_order.price,
                    quantity: fill.quantity,
                });
            }
        }

        info!(%trader, %symbol, ?side, %amount, matched = %plan.total_quantity, "market order executed");
        Ok(plan.total_quantity)
    }

    /// The full ordered sequence for one side of a symbol's book,
    /// fully-filled orders included. Read-only.
    pub fn orders(&self, symbol: Symbol, side: Side) -> Result<&[Order], ExchangeError> {
        if !self.registry.is_tradeable(symbol) {
            return Err(ExchangeError::UnknownToken { symbol });
        }
        Ok(self
            .books
            .get(&symbol)
            .map(|book| book.orders(side))
            .unwrap_or(&[]))
    }

    /// Custodial balance. Zero for unknown pairs, never fails.
    pub fn balance_of(&self, trader: &TraderId, symbol: Symbol) -> Quantity {
        self.ledger.balance_of(trader, symbol)
    }

    /// Registered tokens in registration order.
    pub fn tokens(&self) -> &[Token] {
        self.registry.tokens()
    }

    /// The reserved quote currency.
    pub fn quote(&self) -> &Token {
        self.registry.quote()
    }

    /// Executed trades, oldest first.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// All emitted events.
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// The settlement gateway, for external balance inspection.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Mutable gateway access, for funding embedded external ledgers.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }
}

fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
