//! Settlement gateway trait
//!
//! The exchange consumes this collaborator during deposit and withdrawal.
//! Both legs are synchronous, atomic external calls: they either move the
//! full amount or fail without touching anything.

use serde::{Deserialize, Serialize};
use types::errors::SettlementError;
use types::ids::TraderId;
use types::numeric::Quantity;
use types::token::SettlementAddress;

/// Direction of a custody move, seen from the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferDirection {
    /// External account → exchange custody (deposit leg)
    In,
    /// Exchange custody → external account (withdrawal leg)
    Out,
}

/// Record of a completed custody move, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub direction: TransferDirection,
    pub address: SettlementAddress,
    pub trader: TraderId,
    pub amount: Quantity,
}

/// External custody move-in/move-out collaborator.
pub trait SettlementGateway {
    /// Pull `amount` from the trader's external account into custody.
    fn transfer_in(
        &mut self,
        address: &SettlementAddress,
        trader: &TraderId,
        amount: Quantity,
    ) -> Result<(), SettlementError>;

    /// Release `amount` from custody back to the trader's external account.
    fn transfer_out(
        &mut self,
        address: &SettlementAddress,
        trader: &TraderId,
        amount: Quantity,
    ) -> Result<(), SettlementError>;
}
