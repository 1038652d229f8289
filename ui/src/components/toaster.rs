//! Renders the toast registry in a corner stack.

use api::notify::Notifier;
use api::notify::Toast;
use api::notify::ToastBody;
use api::notify::ToastLevel;
use dioxus::prelude::*;

use crate::components::pico::CloseButton;
use crate::components::tx_hash::TxHash;
use crate::hooks::use_toasts::use_toasts;

fn level_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Loading => "toast toast-loading",
        ToastLevel::Success => "toast toast-success",
        ToastLevel::Error => "toast toast-error",
        ToastLevel::Info => "toast toast-info",
        ToastLevel::Warning => "toast toast-warning",
    }
}

#[component]
fn ToastCard(toast: Toast) -> Element {
    let toasts = use_toasts();
    let id = toast.id;

    rsx! {
        article {
            class: level_class(toast.level),
            role: "status",
            if toast.close_button {
                CloseButton {
                    on_click: move |_| toasts.dismiss(id),
                }
            }
            match toast.body {
                ToastBody::Message { message, description } => rsx! {
                    strong { "{message}" }
                    if let Some(description) = description {
                        p { "{description}" }
                    }
                },
                ToastBody::Transaction(view) => rsx! {
                    header {
                        class: "toast-header",
                        match view.state.icon() {
                            Some(icon) => rsx! {
                                span {
                                    class: "tx-state tx-{view.state}",
                                    "aria-hidden": "true",
                                    "{icon}"
                                }
                            },
                            None => rsx! {
                                span { class: "tx-state tx-spinner", "aria-busy": "true" }
                            },
                        }
                        span { class: "tx-type", "aria-hidden": "true", {view.type_icon()} }
                        strong { "{view.title}" }
                    }
                    p { "{view.message}" }
                    if let Some(hash) = view.hash.clone() {
                        TxHash { hash, network: view.network }
                    }
                    if view.is_awaiting_confirmation() {
                        small { class: "muted", "Awaiting confirmation..." }
                    }
                },
            }
        }
    }
}

#[component]
pub fn Toaster() -> Element {
    let toasts = use_toasts();
    let queue = toasts.queue();
    let visible: Vec<Toast> = queue.read().iter().cloned().collect();

    rsx! {
        div {
            class: "toaster",
            "aria-live": "polite",
            for toast in visible {
                ToastCard { key: "{toast.id}", toast }
            }
        }
    }
}
