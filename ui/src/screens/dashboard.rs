//=============================================================================
// File: src/screens/dashboard.rs
//=============================================================================
use std::time::Duration;

use api::contract::ContractError;
use api::dividends::claim_dividends;
use api::holders::format_bps;
use api::holders::share_bps;
use api::notify::notice::notify_error;
use api::notify::notice::notify_success;
use api::notify::NoticeOptions;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::amount::StxAmount;
use crate::components::dividend_chart::DividendChart;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Stat;
use crate::components::tx_hash::TxHash;
use crate::components::wallet_connection::WalletConnection;
use crate::hooks::use_poller::use_poller;
use crate::hooks::use_toasts::use_toasts;
use crate::mock::MockContract;

/// Fetches the connected wallet's dividend balances and the pool's
/// distribution history into app state.
/// Does nothing while no wallet is connected.
async fn load_balances(
    contract: MockContract,
    mut state: AppStateMut,
) -> Result<(), ContractError> {
    let Some(address) = state.wallet.peek().address().map(str::to_string) else {
        return Ok(());
    };
    let balances = contract.fetch_balances(&address).await?;
    state.balances.set(balances);
    let distributions = contract.fetch_distributions().await?;
    state.distributions.set(distributions);
    Ok(())
}

#[component]
pub fn DashboardScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();

    let mut is_refreshing = use_signal(|| false);
    let mut is_claiming = app_state_mut.claim_in_flight;
    let mut claim_error = use_signal::<Option<String>>(|| None);

    // initial load
    let contract = app_state.contract.clone();
    use_future(move || {
        let contract = contract.clone();
        async move {
            if let Err(e) = load_balances(contract, app_state_mut).await {
                dioxus_logger::tracing::warn!("initial balance load failed: {}", e);
            }
        }
    });

    let contract = app_state.contract.clone();
    use_poller(
        "dashboard refresh",
        move || {
            let settings = app_state_mut.settings.peek();
            settings
                .auto_refresh
                .then(|| Duration::from_secs(settings.refresh_interval_secs))
        },
        move || {
            let contract = contract.clone();
            async move {
                is_refreshing.set(true);
                if let Err(e) = load_balances(contract, app_state_mut).await {
                    dioxus_logger::tracing::warn!("auto refresh failed: {}", e);
                }
                is_refreshing.set(false);
            }
        },
    );

    let contract = app_state.contract.clone();
    let refresh = move |_: MouseEvent| {
        let contract = contract.clone();
        spawn(async move {
            is_refreshing.set(true);
            match load_balances(contract, app_state_mut).await {
                Ok(()) => {
                    notify_success(&toasts, "Data refreshed", NoticeOptions::default());
                }
                Err(e) => {
                    let opts = NoticeOptions::description(e.to_string());
                    notify_error(&toasts, "Refresh failed", opts);
                }
            }
            is_refreshing.set(false);
        });
    };

    let contract = app_state.contract.clone();
    let claim = move |_: MouseEvent| {
        let contract = contract.clone();
        let network = app_state_mut.network();
        let amount = app_state_mut.balances.peek().claimable;
        is_claiming.set(true);
        claim_error.set(None);
        // root-owned so that leaving the dashboard does not cancel the claim
        spawn_forever(async move {
            match claim_dividends(toasts, &contract, network, amount).await {
                Ok(receipt) => {
                    app_state_mut.balances.write().apply_claim();
                    app_state_mut.claims.write().push(receipt.tx_id, receipt.amount);
                    notify_success(
                        &toasts,
                        "Dividends claimed",
                        NoticeOptions::description(format!(
                            "{} will arrive shortly.",
                            receipt.amount.to_string_with_code()
                        )),
                    );
                }
                Err(e) => {
                    let opts = NoticeOptions::description(e.to_string());
                    notify_error(&toasts, "Claim failed", opts);
                    // the dashboard may be gone by now
                    if let Ok(mut shown) = claim_error.try_write() {
                        *shown = Some(e.to_string());
                    }
                }
            }
            is_claiming.set(false);
        });
    };

    if !app_state_mut.wallet.read().is_connected() {
        return rsx! {
            Card {
                EmptyState {
                    title: "Connect your wallet".to_string(),
                    description: Some(
                        "Connect a Stacks wallet to see your dividend balances.".to_string()
                    ),
                    icon: Some("🔌".to_string()),
                    action: Some(rsx! { WalletConnection {} }),
                }
            }
        };
    }

    let balances = *app_state_mut.balances.read();
    let can_claim = balances.can_claim(is_claiming());
    let share = format_bps(share_bps(balances.div_balance, balances.token_supply));
    let network = app_state_mut.network();
    let recent: Vec<_> = app_state_mut.claims.read().recent().cloned().collect();

    rsx! {
        section {
            "aria-label": "Dividend dashboard",
            div {
                class: "section-header",
                hgroup {
                    h2 { "Dividends" }
                    p { "Track your FVT balance and STX distributions." }
                }
                div {
                    style: "display: flex; gap: 0.5rem;",
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        busy: is_refreshing(),
                        on_click: refresh,
                        "Refresh"
                    }
                    Button {
                        disabled: !can_claim,
                        busy: is_claiming(),
                        on_click: claim,
                        "Claim Dividends"
                    }
                }
            }
            if let Some(err) = claim_error() {
                p { class: "field-error", "Claim failed: {err}" }
            }

            Grid {
                Stat {
                    label: "FVT Balance".to_string(),
                    value: format!("{} FVT", balances.div_balance),
                    hint: format!("{share} of supply"),
                }
                Stat {
                    label: "Claimable STX".to_string(),
                    value: format!("{} STX", balances.claimable),
                    hint: "Available to claim".to_string(),
                }
                Stat {
                    label: "Total STX Received".to_string(),
                    value: format!("{} STX", balances.total_received),
                    hint: "All time distributions".to_string(),
                }
                Stat {
                    label: "Current Token Supply".to_string(),
                    value: balances.token_supply.to_string(),
                    hint: "Circulating supply".to_string(),
                }
            }

            DividendChart {}

            Card {
                h3 { "Recent Distributions" }
                if recent.is_empty() {
                    EmptyState {
                        title: "No recent distributions".to_string(),
                        description: Some(
                            "When distributions occur, they'll be listed here.".to_string()
                        ),
                    }
                } else {
                    table {
                        thead { tr {
                            th { "Transaction" }
                            th { "Amount" }
                            th { "Timestamp" }
                        }}
                        tbody {
                            for record in recent {
                                tr {
                                    key: "{record.id}",
                                    td { TxHash { hash: record.tx_id.clone(), network } }
                                    td { StxAmount { amount: record.amount } }
                                    td { {record.timestamp.format("%b %d, %Y %H:%M").to_string()} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
