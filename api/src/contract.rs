//! The dividend token contract as seen from the dashboard.
//!
//! The contract is an external collaborator. Implementations may talk to a
//! node, a wallet extension, or (as the bundled UI does) simulate everything.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::network::Network;
use crate::stx_amount::MicroStx;
use crate::ApiError;

/// Outcome of a submitted contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub tx_id: String,
    pub success: bool,
}

impl TxResult {
    pub fn ok(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            success: true,
        }
    }

    pub fn rejected(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            success: false,
        }
    }
}

/// Snapshot of the contract's administrative state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContractStatus {
    pub paused: bool,
    pub total_supply: Option<u64>,
    pub contract_address: Option<String>,
    pub network: Option<Network>,
    pub last_dividend_at: Option<DateTime<Utc>>,
    pub owner_address: Option<String>,
}

impl ContractStatus {
    /// Whether `address` is the contract owner.
    pub fn is_owner(&self, address: Option<&str>) -> bool {
        match (address, self.owner_address.as_deref()) {
            (Some(address), Some(owner)) => !address.is_empty() && address == owner,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ContractError {
    /// The host application has not wired up this operation.
    #[error("{0} handler not configured")]
    NotConfigured(&'static str),
    /// The contract refuses writes while paused.
    #[error("contract is paused")]
    Paused,
    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// Operations the admin panel and status poller need from the contract.
#[allow(async_fn_in_trait)]
pub trait ContractBackend {
    async fn deposit(&self, amount: MicroStx) -> Result<TxResult, ContractError>;
    async fn mint(&self, recipient: &str, amount: MicroStx) -> Result<TxResult, ContractError>;
    async fn burn(&self, recipient: &str, amount: MicroStx) -> Result<TxResult, ContractError>;
    async fn pause(&self) -> Result<TxResult, ContractError>;
    async fn unpause(&self) -> Result<TxResult, ContractError>;
    async fn fetch_status(&self) -> Result<ContractStatus, ContractError>;
}
