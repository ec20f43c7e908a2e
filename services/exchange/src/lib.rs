//! On-ledger exchange engine.
//!
//! Single-market-per-token spot exchange against a reserved quote
//! currency: token registry, custodial balance ledger, price/time
//! priority order books, and market-order matching. External asset
//! movement goes through the [`settlement::SettlementGateway`] trait.

pub mod book;
pub mod engine;
pub mod events;
pub mod ledger;
mod matching;
pub mod registry;

pub use book::OrderBook;
pub use engine::Exchange;
pub use events::ExchangeEvent;
pub use ledger::BalanceLedger;
pub use registry::TokenRegistry;
