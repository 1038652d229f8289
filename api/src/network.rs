//! Defines the Stacks networks the dashboard can point at.

use serde::Deserialize;
use serde::Serialize;

const EXPLORER_BASE: &str = "https://explorer.hiro.so";

/// The chain a transaction or address lives on.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIs,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    /// The `chain` query value understood by the explorer. The explorer only
    /// knows mainnet and testnet, so devnet links go to testnet.
    pub fn explorer_chain(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet | Self::Devnet => "testnet",
        }
    }

    /// Explorer link for a transaction, or `None` when there is no hash yet.
    pub fn explorer_tx_url(&self, hash: Option<&str>) -> Option<String> {
        let hash = hash.filter(|h| !h.is_empty())?;
        Some(format!(
            "{}/txid/{}?chain={}",
            EXPLORER_BASE,
            hash,
            self.explorer_chain()
        ))
    }

    /// Explorer link for an account address.
    pub fn explorer_address_url(&self, address: &str) -> String {
        match self {
            Self::Mainnet => format!("{}/address/{}", EXPLORER_BASE, address),
            _ => format!("{}/address/{}?chain=testnet", EXPLORER_BASE, address),
        }
    }
}
