//=============================================================================
// File: src/screens/landing.rs
//=============================================================================
use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::wallet_connection::WalletConnection;
use crate::Screen;

const FEATURES: [(&str, &str); 3] = [
    (
        "Automatic distributions",
        "STX deposited into the vault is split across every FVT holder by balance.",
    ),
    (
        "Claim any time",
        "Your share accrues on chain until you claim it. No deadlines.",
    ),
    (
        "Transparent ledger",
        "Every holder, deposit and claim can be checked on the Stacks explorer.",
    ),
];

#[component]
pub fn LandingScreen() -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let mut active_screen = use_context::<Signal<Screen>>();
    let connected = app_state_mut.wallet.read().is_connected();

    rsx! {
        section {
            style: "text-align: center; padding: 3rem 0;",
            hgroup {
                h1 { "Earn STX by holding FVT" }
                p { "FinoVault pays dividends in STX to every holder of the FinoVault token." }
            }
            if connected {
                Button {
                    on_click: move |_| active_screen.set(Screen::Dashboard),
                    "Go to dashboard"
                }
            } else {
                div {
                    style: "display: inline-block;",
                    WalletConnection {}
                }
            }
        }
        Grid {
            for (title, body) in FEATURES {
                Card {
                    h4 { "{title}" }
                    p { class: "muted", "{body}" }
                }
            }
        }
    }
}
