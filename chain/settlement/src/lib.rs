//! External Custody Collaborator
//!
//! The exchange engine never touches external token contracts directly;
//! it goes through the [`SettlementGateway`] trait. This crate defines
//! that trait and ships [`ExternalLedger`], an in-memory implementation
//! modelling per-contract trader wallets and the exchange's custody
//! totals.
//!
//! # Modules
//! - `gateway`: The gateway trait and transfer audit records
//! - `external`: In-memory reference implementation

pub mod external;
pub mod gateway;

pub use external::ExternalLedger;
pub use gateway::{SettlementGateway, TransferDirection, TransferRecord};
