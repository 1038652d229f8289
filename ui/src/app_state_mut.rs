//! Defines the mutable, reactive state for the application's UI.

use api::admin::AdminActionLog;
use api::contract::ContractStatus;
use api::dividends::Distribution;
use api::dividends::DividendBalances;
use api::dividends::DividendHistory;
use api::network::Network;
use api::settings::DashboardSettings;
use api::wallet::WalletStatus;
use dioxus::prelude::*;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// This struct holds `Signal`s for any UI-related state that needs to change
/// and trigger automatic re-renders in the view. It is separate from the core,
/// immutable `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// Saved settings. Edits on the settings screen only land here on save.
    pub settings: Signal<DashboardSettings>,
    pub wallet: Signal<WalletStatus>,
    pub balances: Signal<DividendBalances>,
    pub claims: Signal<DividendHistory>,
    /// Pool deposits over time, for the distribution chart.
    pub distributions: Signal<Vec<Distribution>>,
    /// `None` until the first status fetch completes.
    pub contract_status: Signal<Option<ContractStatus>>,
    pub admin_log: Signal<AdminActionLog>,
    /// Set while a claim runs. Claims outlive the dashboard, so the flag
    /// lives here rather than in the screen.
    pub claim_in_flight: Signal<bool>,
    /// Set while an admin action runs; locks every admin control.
    pub admin_in_flight: Signal<bool>,
}

impl AppStateMut {
    pub fn network(&self) -> Network {
        self.settings.read().network
    }

    /// Whether the connected wallet owns the contract.
    pub fn is_owner(&self) -> bool {
        let wallet = self.wallet.read();
        self.contract_status
            .read()
            .as_ref()
            .is_some_and(|status| status.is_owner(wallet.address()))
    }
}
