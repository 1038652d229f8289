use api::holders::truncate_address;
use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::components::pico::Button;
use crate::components::pico::CopyButton;
use crate::components::pico::Modal;

/// An abbreviated Stacks address that opens the full address, a copy button
/// and an explorer link when clicked.
#[component]
pub fn Address(address: String, #[props(default)] highlight: bool) -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let mut is_modal_open = use_signal(|| false);

    let abbreviated = truncate_address(&address);
    let explorer_url = app_state_mut.network().explorer_address_url(&address);
    let class = if highlight { "address mine" } else { "address" };

    rsx! {
        Modal {
            is_open: is_modal_open,
            title: "Address".to_string(),
            code {
                style: "display: block; word-break: break-all; padding: 1rem;",
                "{address}"
            }
            footer {
                style: "display: flex; justify-content: flex-end; align-items: center; gap: 1rem;",
                a {
                    href: "{explorer_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "View in explorer"
                }
                CopyButton { text_to_copy: address.clone() }
                Button {
                    on_click: move |_| is_modal_open.set(false),
                    "Close"
                }
            }
        }

        span {
            class: "{class}",
            style: "cursor: pointer;",
            title: "{address}",
            onclick: move |_| is_modal_open.set(true),
            code { "{abbreviated}" }
        }
    }
}
