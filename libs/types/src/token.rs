//! Token registration types
//!
//! A token is a symbol bound to an external settlement address. Symbols
//! are fixed-width byte strings so two tickers differing only in padding
//! or case can never collide silently.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SymbolError;

/// Maximum ticker length in bytes.
pub const SYMBOL_LEN: usize = 8;

/// A case-sensitive, fixed-width token ticker (e.g. "REP", "BAT").
///
/// Stored as up to [`SYMBOL_LEN`] ASCII bytes, zero-padded. Comparison
/// and hashing operate on the padded bytes, so "REP" and "REP\0" are the
/// same symbol but "rep" is not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol([u8; SYMBOL_LEN]);

impl Symbol {
    /// Create a symbol from a ticker string.
    ///
    /// Rejects empty tickers, tickers longer than [`SYMBOL_LEN`] bytes,
    /// and anything outside printable ASCII.
    pub fn new(ticker: &str) -> Result<Self, SymbolError> {
        let bytes = ticker.as_bytes();
        if bytes.is_empty() {
            return Err(SymbolError::Empty);
        }
        if bytes.len() > SYMBOL_LEN {
            return Err(SymbolError::TooLong {
                ticker: ticker.to_string(),
                max: SYMBOL_LEN,
            });
        }
        if !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(SymbolError::InvalidCharacter {
                ticker: ticker.to_string(),
            });
        }
        let mut padded = [0u8; SYMBOL_LEN];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(padded))
    }

    /// The ticker with padding stripped.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(SYMBOL_LEN);
        // Validated as ASCII at construction
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SymbolVisitor;

        impl Visitor<'_> for SymbolVisitor {
            type Value = Symbol;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a ticker of 1..={} printable ASCII bytes", SYMBOL_LEN)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Symbol, E> {
                Symbol::new(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(SymbolVisitor)
    }
}

/// Opaque reference to the external contract that custodies a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementAddress(String);

impl SettlementAddress {
    /// Create from an external address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettlementAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered token: ticker plus its settlement address.
///
/// Created once at registration; immutable thereafter, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: Symbol,
    pub settlement_address: SettlementAddress,
}

impl Token {
    /// Create a new token record.
    pub fn new(symbol: Symbol, settlement_address: SettlementAddress) -> Self {
        Self {
            symbol,
            settlement_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trips_ticker() {
        let symbol = Symbol::new("REP").unwrap();
        assert_eq!(symbol.as_str(), "REP");
        assert_eq!(symbol.to_string(), "REP");
    }

    #[test]
    fn test_symbol_is_case_sensitive() {
        let upper = Symbol::new("REP").unwrap();
        let lower = Symbol::new("rep").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_symbol_rejects_empty() {
        assert!(matches!(Symbol::new(""), Err(SymbolError::Empty)));
    }

    #[test]
    fn test_symbol_rejects_too_long() {
        let result = Symbol::new("TOOLONGTICKER");
        assert!(matches!(result, Err(SymbolError::TooLong { .. })));
    }

    #[test]
    fn test_symbol_rejects_whitespace() {
        let result = Symbol::new("R P");
        assert!(matches!(result, Err(SymbolError::InvalidCharacter { .. })));
    }

    #[test]
    fn test_symbol_max_length_accepted() {
        let symbol = Symbol::new("ABCDEFGH").unwrap();
        assert_eq!(symbol.as_str(), "ABCDEFGH");
    }

    #[test]
    fn test_symbol_serde_as_string() {
        let symbol = Symbol::new("DAI").unwrap();
        let json = serde_json::to_string(&symbol).unwrap();
        assert_eq!(json, "\"DAI\"");
        let back: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(symbol, back);
    }

    #[test]
    fn test_symbol_serde_rejects_invalid() {
        let result: Result<Symbol, _> = serde_json::from_str("\"WAY_TOO_LONG\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_construction() {
        let token = Token::new(
            Symbol::new("BAT").unwrap(),
            SettlementAddress::new("0xbat0000"),
        );
        assert_eq!(token.symbol.as_str(), "BAT");
        assert_eq!(token.settlement_address.as_str(), "0xbat0000");
    }
}
