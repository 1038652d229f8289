//! Wallet connection as an external collaborator.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::network::Network;
use crate::stx_amount::MicroStx;
use crate::ApiError;

/// Fraction digits shown for wallet balances.
pub const BALANCE_DECIMALS: usize = 4;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("no wallet provider available")]
    Unavailable,
    #[error("connection rejected by user")]
    Rejected,
    #[error("wallet is not connected")]
    NotConnected,
    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// What the dashboard needs from a browser or desktop wallet.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Prompts the user and returns the connected address.
    async fn connect(&self) -> Result<String, WalletError>;
    async fn disconnect(&self) -> Result<(), WalletError>;
    fn is_signed_in(&self) -> bool;
    fn address(&self, network: Network) -> Option<String>;
    async fn stx_balance(&self, address: &str) -> Result<MicroStx, WalletError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, strum::EnumIs)]
pub enum WalletStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        address: String,
        balance: Option<MicroStx>,
    },
    Error(String),
}

impl WalletStatus {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<MicroStx> {
        match self {
            Self::Connected { balance, .. } => *balance,
            _ => None,
        }
    }

    /// Balance for display: `"--"` until known, else at most four fraction
    /// digits, truncated.
    pub fn balance_display(&self) -> String {
        match self.balance() {
            Some(balance) => balance.to_string_truncated(BALANCE_DECIMALS),
            None => "--".to_string(),
        }
    }
}

/// Connects and fetches the balance. A failed balance lookup still leaves
/// the wallet connected, with an unknown balance.
pub async fn connect_wallet<W: WalletProvider>(wallet: &W) -> WalletStatus {
    let address = match wallet.connect().await {
        Ok(address) => address,
        Err(e) => {
            dioxus_logger::tracing::warn!("wallet connect failed: {}", e);
            return WalletStatus::Error(e.to_string());
        }
    };
    let balance = match wallet.stx_balance(&address).await {
        Ok(b) => Some(b),
        Err(e) => {
            dioxus_logger::tracing::warn!("balance lookup for {} failed: {}", address, e);
            None
        }
    };
    dioxus_logger::tracing::info!("wallet connected: {}", address);
    WalletStatus::Connected { address, balance }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_display() {
        assert_eq!(WalletStatus::Disconnected.balance_display(), "--");
        let status = WalletStatus::Connected {
            address: "SP1ABC".to_string(),
            balance: Some(MicroStx::from_micro(1_234_567_899)),
        };
        assert_eq!(status.balance_display(), "1234.5678");
        assert_eq!(status.address(), Some("SP1ABC"));

        let unknown = WalletStatus::Connected {
            address: "SP1ABC".to_string(),
            balance: None,
        };
        assert_eq!(unknown.balance_display(), "--");
    }
}
