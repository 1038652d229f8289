use api::dividends::DividendBalances;
use api::dividends::DividendHistory;
use api::holders::truncate_address;
use api::notify::notice::notify_error;
use api::notify::notice::notify_success;
use api::notify::NoticeOptions;
use api::wallet::connect_wallet;
use api::wallet::WalletProvider;
use api::wallet::WalletStatus;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::hooks::use_toasts::use_toasts;
use crate::Screen;

/// Connect button, or the connected address and balance with a disconnect
/// button.
#[component]
pub fn WalletConnection() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut active_screen = use_context::<Signal<Screen>>();
    let toasts = use_toasts();

    let connect = {
        let app_state = app_state.clone();
        move |_| {
            let wallet = app_state.wallet.clone();
            app_state_mut.wallet.set(WalletStatus::Connecting);
            // the widget can unmount mid-connect (landing -> dashboard), the
            // status must still leave `Connecting`
            spawn_forever(async move {
                let status = connect_wallet(&wallet).await;
                match &status {
                    WalletStatus::Connected { address, .. } => {
                        notify_success(
                            &toasts,
                            "Wallet connected successfully",
                            NoticeOptions::description(truncate_address(address)),
                        );
                        if active_screen.peek().is_landing() {
                            active_screen.set(Screen::Dashboard);
                        }
                    }
                    WalletStatus::Error(msg) => {
                        notify_error(
                            &toasts,
                            "Failed to connect wallet",
                            NoticeOptions::description(msg.clone()),
                        );
                    }
                    _ => {}
                }
                app_state_mut.wallet.set(status);
            });
        }
    };

    let disconnect = move |_: MouseEvent| {
        let wallet = app_state.wallet.clone();
        spawn(async move {
            if let Err(e) = wallet.disconnect().await {
                dioxus_logger::tracing::warn!("wallet disconnect failed: {}", e);
            }
            app_state_mut.wallet.set(WalletStatus::Disconnected);
            app_state_mut.balances.set(DividendBalances::default());
            app_state_mut.claims.set(DividendHistory::default());
            active_screen.set(Screen::Landing);
            notify_success(&toasts, "Wallet disconnected", NoticeOptions::default());
        });
    };

    let status = app_state_mut.wallet.read().clone();
    rsx! {
        match status {
            WalletStatus::Connected { address, .. } => {
                let short = truncate_address(&address);
                let balance = app_state_mut.wallet.read().balance_display();
                rsx! {
                    div {
                        class: "wallet-connection",
                        span {
                            title: "{address}",
                            code { "{short}" }
                        }
                        span { class: "muted", "{balance} STX" }
                        Button {
                            button_type: ButtonType::Secondary,
                            outline: true,
                            on_click: disconnect,
                            "Disconnect"
                        }
                    }
                }
            }
            WalletStatus::Connecting => rsx! {
                Button { busy: true, "Connecting..." }
            },
            WalletStatus::Disconnected | WalletStatus::Error(_) => rsx! {
                Button { on_click: connect, "Connect Wallet" }
            },
        }
    }
}
