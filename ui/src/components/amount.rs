//! A component for displaying STX amounts.

use api::stx_amount::MicroStx;
use dioxus::prelude::*;

/// Shows `amount` with at most `decimals` fraction digits (truncated) and
/// the exact value on hover.
#[component]
pub fn StxAmount(
    amount: MicroStx,
    #[props(default = 6)] decimals: usize,
    #[props(default = true)] show_code: bool,
) -> Element {
    let shown = amount.to_string_truncated(decimals);
    let exact = amount.to_string_with_code();

    rsx! {
        span {
            class: "amount",
            title: "{exact}",
            "{shown}"
            if show_code {
                " STX"
            }
        }
    }
}
