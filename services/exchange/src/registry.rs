//! Token registry
//!
//! Maps tickers to their settlement addresses and keeps the listing in
//! registration order. The quote currency is configured at construction,
//! never enters the registry, and can never be registered: it exists only
//! implicitly through the balance ledger.

use std::collections::HashMap;

use types::errors::ExchangeError;
use types::token::{SettlementAddress, Symbol, Token};

/// Registry of tradeable tokens plus the reserved quote currency.
#[derive(Debug)]
pub struct TokenRegistry {
    quote: Token,
    /// Tokens in registration order (the listing the read API exposes).
    listing: Vec<Token>,
    /// Ticker → index into `listing`.
    by_symbol: HashMap<Symbol, usize>,
}

impl TokenRegistry {
    /// Create a registry with the given quote currency.
    pub fn new(quote: Token) -> Self {
        Self {
            quote,
            listing: Vec::new(),
            by_symbol: HashMap::new(),
        }
    }

    /// The reserved quote currency.
    pub fn quote(&self) -> &Token {
        &self.quote
    }

    /// Register a tradeable token.
    ///
    /// Rejects the reserved quote symbol and duplicates; otherwise appends
    /// to the listing.
    pub fn register(
        &mut self,
        symbol: Symbol,
        settlement_address: SettlementAddress,
    ) -> Result<(), ExchangeError> {
        if symbol == self.quote.symbol {
            return Err(ExchangeError::ReservedSymbol { symbol });
        }
        if self.by_symbol.contains_key(&symbol) {
            return Err(ExchangeError::DuplicateToken { symbol });
        }
        self.by_symbol.insert(symbol, self.listing.len());
        self.listing.push(Token::new(symbol, settlement_address));
        Ok(())
    }

    /// Check if a symbol is a registered tradeable token.
    ///
    /// The quote currency is never tradeable and never registered, so
    /// this is exactly "present in the registry".
    pub fn is_tradeable(&self, symbol: Symbol) -> bool {
        self.by_symbol.contains_key(&symbol)
    }

    /// Look up a token accepted for custody: any registered token, or the
    /// quote currency itself.
    pub fn resolve(&self, symbol: Symbol) -> Result<&Token, ExchangeError> {
        if symbol == self.quote.symbol {
            return Ok(&self.quote);
        }
        self.by_symbol
            .get(&symbol)
            .map(|&idx| &self.listing[idx])
            .ok_or(ExchangeError::UnknownToken { symbol })
    }

    /// Look up a token valid as the subject of an order.
    ///
    /// The quote currency is rejected with a distinct cause so callers can
    /// tell "not registered" from "registered but reserved".
    pub fn ensure_tradeable(&self, symbol: Symbol) -> Result<&Token, ExchangeError> {
        if symbol == self.quote.symbol {
            return Err(ExchangeError::QuoteCurrencyNotTradeable { symbol });
        }
        self.by_symbol
            .get(&symbol)
            .map(|&idx| &self.listing[idx])
            .ok_or(ExchangeError::UnknownToken { symbol })
    }

    /// All registered tokens, in registration order.
    pub fn tokens(&self) -> &[Token] {
        &self.listing
    }
}
