//! Custodial balance ledger
//!
//! Per-(trader, symbol) balances, never negative. Every debit performs
//! its sufficiency check and the subtraction as one operation; entries
//! default to zero, so reads never fail.

use std::collections::HashMap;

use types::errors::ExchangeError;
use types::ids::TraderId;
use types::numeric::Quantity;
use types::token::Symbol;

/// Balances: trader → (symbol → amount).
#[derive(Debug, Default)]
pub struct BalanceLedger {
    balances: HashMap<TraderId, HashMap<Symbol, Quantity>>,
}

impl BalanceLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance for a trader and symbol. Zero for unknown pairs.
    pub fn balance_of(&self, trader: &TraderId, symbol: Symbol) -> Quantity {
        self.balances
            .get(trader)
            .and_then(|assets| assets.get(&symbol))
            .copied()
            .unwrap_or_else(Quantity::zero)
    }

    /// Credit a trader's balance with overflow protection.
    pub fn credit(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<Quantity, ExchangeError> {
        let assets = self.balances.entry(*trader).or_default();
        let current = assets.entry(symbol).or_default();
        let updated = current.checked_add(amount).ok_or(ExchangeError::Overflow)?;
        *current = updated;
        Ok(updated)
    }

    /// Debit a trader's balance, checking sufficiency in the same step.
    pub fn debit(
        &mut self,
        trader: &TraderId,
        symbol: Symbol,
        amount: Quantity,
    ) -> Result<Quantity, ExchangeError> {
        let available = self.balance_of(trader, symbol);
        let updated = available
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientBalance {
                symbol,
                required: amount,
                available,
            })?;
        self.balances
            .entry(*trader)
            .or_default()
            .insert(symbol, updated);
        Ok(updated)
    }

    /// Overwrite a balance with a pre-validated value.
    ///
    /// Only the matching engine's commit phase uses this, after every
    /// staged mutation for the call has been checked.
    pub(crate) fn set_balance(&mut self, trader: &TraderId, symbol: Symbol, amount: Quantity) {
        self.balances
            .entry(*trader)
            .or_default()
            .insert(symbol, amount);
    }

    /// Sum of all traders' balances for one symbol.
    pub fn total_balance(&self, symbol: Symbol) -> Quantity {
        self.balances
            .values()
            .filter_map(|assets| assets.get(&symbol))
            .fold(Quantity::zero(), |acc, qty| {
                acc.checked_add(*qty).unwrap_or(acc)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rep() -> Symbol {
        Symbol::new("REP").unwrap()
    }

    #[test]
    fn test_balance_defaults_to_zero() {
        let ledger = BalanceLedger::new();
        assert!(ledger.balance_of(&TraderId::new(), rep()).is_zero());
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = BalanceLedger::new();
        let trader = TraderId::new();

        ledger.credit(&trader, rep(), Quantity::from_u64(100)).unwrap();
        let updated = ledger.credit(&trader, rep(), Quantity::from_u64(50)).unwrap();

        assert_eq!(updated, Quantity::from_u64(150));
        assert_eq!(ledger.balance_of(&trader, rep()), Quantity::from_u64(150));
    }

    #[test]
    fn test_debit_checks_sufficiency() {
        let mut ledger = BalanceLedger::new();
        let trader = TraderId::new();
        ledger.credit(&trader, rep(), Quantity::from_u64(30)).unwrap();

        let result = ledger.debit(&trader, rep(), Quantity::from_u64(31));
        assert_eq!(
            result,
            Err(ExchangeError::InsufficientBalance {
                symbol: rep(),
                required: Quantity::from_u64(31),
                available: Quantity::from_u64(30),
            })
        );
        // Failed debit leaves the balance untouched
        assert_eq!(ledger.balance_of(&trader, rep()), Quantity::from_u64(30));

        let remaining = ledger.debit(&trader, rep(), Quantity::from_u64(30)).unwrap();
        assert!(remaining.is_zero());
    }

    #[test]
    fn test_traders_are_isolated() {
        let mut ledger = BalanceLedger::new();
        let (alice, bob) = (TraderId::new(), TraderId::new());

        ledger.credit(&alice, rep(), Quantity::from_u64(10)).unwrap();
        ledger.credit(&bob, rep(), Quantity::from_u64(5)).unwrap();

        assert_eq!(ledger.balance_of(&alice, rep()), Quantity::from_u64(10));
        assert_eq!(ledger.balance_of(&bob, rep()), Quantity::from_u64(5));
        assert_eq!(ledger.total_balance(rep()), Quantity::from_u64(15));
    }
}
