use api::network::Network;
use api::notify::tx::truncate_hash;
use dioxus::prelude::*;

use crate::components::pico::CopyButton;

/// A transaction hash, abbreviated, linked to the explorer, with a copy button.
#[component]
pub fn TxHash(hash: String, network: Network) -> Element {
    let abbreviated = truncate_hash(&hash, 6, 6);
    let href = network.explorer_tx_url(Some(&hash));

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 0.5rem;",
            match href {
                Some(href) => rsx! {
                    a {
                        href: "{href}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        title: "{hash}",
                        code { "{abbreviated}" }
                    }
                },
                None => rsx! {
                    code { title: "{hash}", "{abbreviated}" }
                },
            }
            CopyButton {
                text_to_copy: hash.clone(),
            }
        }
    }
}
