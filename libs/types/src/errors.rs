//! Error taxonomy for the exchange engine
//!
//! Every failure carries a distinct, stable cause so callers and tests
//! can assert on it. Validation errors are raised before any mutation;
//! resource errors abort with full rollback of the failing call; external
//! settlement errors propagate wrapped.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::numeric::Quantity;
use crate::token::{SettlementAddress, Symbol};

/// Top-level exchange error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("unknown token: {symbol}")]
    UnknownToken { symbol: Symbol },

    #[error("token already registered: {symbol}")]
    DuplicateToken { symbol: Symbol },

    #[error("symbol is reserved for the quote currency: {symbol}")]
    ReservedSymbol { symbol: Symbol },

    #[error("quote currency cannot be traded: {symbol}")]
    QuoteCurrencyNotTradeable { symbol: Symbol },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("insufficient balance for {symbol}: required {required}, available {available}")]
    InsufficientBalance {
        symbol: Symbol,
        required: Quantity,
        available: Quantity,
    },

    #[error("insufficient token balance for {symbol}: required {required}, available {available}")]
    InsufficientTokenBalance {
        symbol: Symbol,
        required: Quantity,
        available: Quantity,
    },

    #[error("insufficient quote balance: required {required}, available {available}")]
    InsufficientQuoteBalance {
        required: Quantity,
        available: Quantity,
    },

    #[error("settlement transfer failed: {0}")]
    SettlementTransferFailed(#[from] SettlementError),

    #[error("arithmetic overflow in balance calculation")]
    Overflow,
}

/// Errors raised by the external settlement collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("no settlement contract at {address}")]
    UnknownContract { address: SettlementAddress },

    #[error("external balance too low at {address}: required {required}, available {available}")]
    InsufficientExternalBalance {
        address: SettlementAddress,
        required: Quantity,
        available: Quantity,
    },

    #[error("arithmetic overflow in external transfer")]
    Overflow,
}

/// Fixed-point construction and parsing errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("value must be non-negative: {value}")]
    Negative { value: Decimal },

    #[error("value exceeds 18 fractional digits: {value}")]
    PrecisionExceeded { value: Decimal },

    #[error("not a decimal number: {input}")]
    Unparseable { input: String },
}

/// Symbol validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    #[error("ticker must not be empty")]
    Empty,

    #[error("ticker too long: {ticker} (max {max} bytes)")]
    TooLong { ticker: String, max: usize },

    #[error("ticker contains non-printable or non-ASCII characters: {ticker}")]
    InvalidCharacter { ticker: String },
}
