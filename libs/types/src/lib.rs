//! Types library for the on-ledger exchange engine
//!
//! This library provides the type definitions shared across the exchange
//! workspace, keeping numeric behavior, identifiers, and the error
//! taxonomy in one place.
//!
//! # Modules
//! - `ids`: Unique identifiers (TraderId, OrderId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `token`: Tickers, settlement addresses, registered tokens
//! - `order`: Order side and resting limit orders
//! - `trade`: Executed trade records
//! - `errors`: Error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod token;
pub mod trade;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::token::*;
    pub use crate::trade::*;
}
