//! Market-order matching
//!
//! Market orders execute in two phases. The planning pass walks the
//! opposite side of the book in priority order and stages every balance
//! mutation in a scratch table, checking each debit against the staged
//! view; the commit pass (in the engine) writes the staged balances and
//! advances the resting orders' fills. A failure anywhere in the plan
//! therefore aborts the whole call with nothing applied, including
//! partial chunks that had already validated.

use std::collections::HashMap;

use types::errors::ExchangeError;
use types::ids::TraderId;
use types::numeric::Quantity;
use types::order::{Order, Side};
use types::token::Symbol;

use crate::ledger::BalanceLedger;

/// One matched chunk against a resting order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fill {
    /// Index of the resting order within its side's sequence.
    pub index: usize,
    pub quantity: Quantity,
    /// Quote moved for this chunk: `quantity × resting.price`.
    pub cost: Quantity,
}

/// A fully validated execution plan for one market order.
#[derive(Debug)]
pub(crate) struct MatchPlan {
    pub fills: Vec<Fill>,
    /// Total matched quantity; anything short of the requested amount is
    /// dropped, market orders never rest.
    pub total_quantity: Quantity,
    /// Final balances for every (trader, symbol) the plan touches.
    pub staged: HashMap<(TraderId, Symbol), Quantity>,
}

/// A staged debit that the current balances cannot cover.
struct ShortFall {
    symbol: Symbol,
    required: Quantity,
    available: Quantity,
}

/// Scratch view over the ledger: reads fall through to the committed
/// balance until a staged write shadows it.
struct StagedBalances<'a> {
    ledger: &'a BalanceLedger,
    staged: HashMap<(TraderId, Symbol), Quantity>,
}

impl<'a> StagedBalances<'a> {
    fn new(ledger: &'a BalanceLedger) -> Self {
        Self {
            ledger,
            staged: HashMap::new(),
        }
    }

    fn effective(&self, trader: &TraderId, symbol: Symbol) -> Quantity {
        self.staged
            .get(&(*trader, symbol))
            .copied()
            .unwrap_or_else(|| self.ledger.balance_of(trader, symbol))
    }

    fn debit(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<(), ShortFall> {
        let available = self.effective(trader, symbol);
        let updated = available.checked_sub(amount).ok_or(ShortFall {
            symbol,
            required: amount,
            available,
        })?;
        self.staged.insert((*trader, symbol), updated);
        Ok(())
    }

    fn credit(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<(), ExchangeError> {
        let updated = self
            .effective(trader, symbol)
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;
        self.staged.insert((*trader, symbol), updated);
        Ok(())
    }
}

/// Build the execution plan for a market order.
///
/// `opposite` is the side the order consumes, already in priority order:
/// asks (price ascending) for a Buy, bids (price descending) for a Sell.
/// Fully-filled resting orders are skipped. Each chunk settles at the
/// resting order's limit price.
pub(crate) fn plan_market_order(
    ledger: &BalanceLedger,
    opposite: &[Order],
    taker: &TraderId,
    taker_side: Side,
    amount: Quantity,
    symbol: Symbol,
    quote: Symbol,
) -> Result<MatchPlan, ExchangeError> {
    let mut staged = StagedBalances::new(ledger);
    let mut fills = Vec::new();
    let mut left = amount;

    for (index, resting) in opposite.iter().enumerate() {
        if left.is_zero() {
            break;
        }
        if resting.is_filled() {
            continue;
        }

        let quantity = resting.remaining().min(left);
        let cost = quantity
            .checked_mul(resting.price)
            .ok_or(ExchangeError::Overflow)?;
        let (buyer, seller) = match taker_side {
            Side::Buy => (taker, &resting.trader),
            Side::Sell => (&resting.trader, taker),
        };

        // Token leg, then quote leg. A shortfall on either side of either
        // leg voids the entire call, matching the all-or-nothing contract.
        staged
            .debit(seller, symbol, quantity)
            .map_err(|shortfall| insufficiency(shortfall, quote))?;
        staged.credit(buyer, symbol, quantity)?;
        staged
            .debit(buyer, quote, cost)
            .map_err(|shortfall| insufficiency(shortfall, quote))?;
        staged.credit(seller, quote, cost)?;

        fills.push(Fill {
            index,
            quantity,
            cost,
        });
        left = left.checked_sub(quantity).ok_or(ExchangeError::Overflow)?;
    }

    let total_quantity = amount.checked_sub(left).ok_or(ExchangeError::Overflow)?;
    Ok(MatchPlan {
        fills,
        total_quantity,
        staged: staged.staged,
    })
}

fn insufficiency(shortfall: ShortFall, quote: Symbol) -> ExchangeError {
    if shortfall.symbol == quote {
        ExchangeError::InsufficientQuoteBalance {
            required: shortfall.required,
            available: shortfall.available,
        }
    } else {
        ExchangeError::InsufficientTokenBalance {
            symbol: shortfall.symbol,
            required: shortfall.required,
            available: shortfall.available,
        }
    }
}
