//! In-memory external ledger
//!
//! Models the external token contracts the engine settles against: one
//! balance table per settlement address, plus the custody total each
//! address holds on behalf of the exchange. Used directly in tests and as
//! the reference gateway implementation.

use std::collections::HashMap;

use types::errors::SettlementError;
use types::ids::TraderId;
use types::numeric::Quantity;
use types::token::SettlementAddress;

use crate::gateway::{SettlementGateway, TransferDirection, TransferRecord};

/// Per-contract external state: trader wallets and the exchange's custody
/// total for that contract.
#[derive(Debug, Default)]
struct ContractState {
    wallets: HashMap<TraderId, Quantity>,
    custody: Quantity,
}

/// External custody ledger keyed by settlement address.
///
/// A transfer either completes in full or leaves every wallet and custody
/// total unchanged.
#[derive(Debug, Default)]
pub struct ExternalLedger {
    contracts: HashMap<SettlementAddress, ContractState>,
    records: Vec<TransferRecord>,
}

impl ExternalLedger {
    /// Create an empty external ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a trader's external wallet (the mock token faucet).
    pub fn fund(&mut self, address: &SettlementAddress, trader: &TraderId, amount: Quantity) {
        let contract = self.contracts.entry(address.clone()).or_default();
        let wallet = contract.wallets.entry(*trader).or_default();
        *wallet = wallet.checked_add(amount).unwrap_or(*wallet);
    }

    /// External wallet balance for a trader. Zero for unknown pairs.
    pub fn wallet_balance(&self, address: &SettlementAddress, trader: &TraderId) -> Quantity {
        self.contracts
            .get(address)
            .and_then(|contract| contract.wallets.get(trader))
            .copied()
            .unwrap_or_else(Quantity::zero)
    }

    /// Amount a contract currently holds in custody for the exchange.
    pub fn custody_balance(&self, address: &SettlementAddress) -> Quantity {
        self.contracts
            .get(address)
            .map(|contract| contract.custody)
            .unwrap_or_else(Quantity::zero)
    }

    /// All completed transfers, in execution order.
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }
}

impl SettlementGateway for ExternalLedger {
    fn transfer_in(
        &mut self,
        address: &SettlementAddress,
        trader: &TraderId,
        amount: Quantity,
    ) -> Result<(), SettlementError> {
        let contract =
            self.contracts
                .get_mut(address)
                .ok_or_else(|| SettlementError::UnknownContract {
                    address: address.clone(),
                })?;

        let wallet = contract
            .wallets
            .get(trader)
            .copied()
            .unwrap_or_else(Quantity::zero);
        let debited =
            wallet
                .checked_sub(amount)
                .ok_or_else(|| SettlementError::InsufficientExternalBalance {
                    address: address.clone(),
                    required: amount,
                    available: wallet,
                })?;
        let custody = contract
            .custody
            .checked_add(amount)
            .ok_or(SettlementError::Overflow)?;

        contract.wallets.insert(*trader, debited);
        contract.custody = custody;
        self.records.push(TransferRecord {
            direction: TransferDirection::In,
            address: address.clone(),
            trader: *trader,
            amount,
        });
        Ok(())
    }

    fn transfer_out(
        &mut self,
        address: &SettlementAddress,
        trader: &TraderId,
        amount: Quantity,
    ) -> Result<(), SettlementError> {
        let contract =
            self.contracts
                .get_mut(address)
                .ok_or_else(|| SettlementError::UnknownContract {
                    address: address.clone(),
                })?;

        let custody = contract.custody.checked_sub(amount).ok_or_else(|| {
            SettlementError::InsufficientExternalBalance {
                address: address.clone(),
                required: amount,
                available: contract.custody,
            }
        })?;
        let wallet = contract
            .wallets
            .get(trader)
            .copied()
            .unwrap_or_else(Quantity::zero);
        let credited = wallet.checked_add(amount).ok_or(SettlementError::Overflow)?;

        contract.custody = custody;
        contract.wallets.insert(*trader, credited);
        self.records.push(TransferRecord {
            direction: TransferDirection::Out,
            address: address.clone(),
            trader: *trader,
            amount,
        });
        Ok(())
    }
}
