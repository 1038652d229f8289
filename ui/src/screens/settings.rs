//=============================================================================
// File: src/screens/settings.rs
//=============================================================================
use std::str::FromStr;

use api::holders::PAGE_SIZES;
use api::network::Network;
use api::notify::notice::notify_copy_result;
use api::notify::notice::notify_error;
use api::notify::notice::notify_info;
use api::notify::notice::notify_success;
use api::notify::notice::notify_warning;
use api::notify::NoticeOptions;
use api::settings::DashboardSettings;
use api::settings::SettingsDraft;
use api::settings::MIN_INTERVAL_SECS;
use dioxus::prelude::*;
use strum::IntoEnumIterator;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::compat;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Input;
use crate::hooks::use_toasts::use_toasts;

/// Parses a numeric field, leaving the draft untouched on garbage so the
/// input can be corrected.
fn parse_field<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[component]
pub fn SettingsScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();

    let mut draft = use_signal(|| SettingsDraft::new(app_state_mut.settings.peek().clone()));
    let mut save_error = use_signal::<Option<String>>(|| None);

    let contract = app_state.contract.clone();
    let save = move |_: MouseEvent| {
        let saved = match draft.write().save() {
            Ok(saved) => saved.clone(),
            Err(e) => {
                save_error.set(Some(e.to_string()));
                let opts = NoticeOptions::description(e.to_string());
                notify_error(&toasts, "Settings not saved", opts);
                return;
            }
        };
        save_error.set(None);
        let network_changed = saved.network != app_state_mut.settings.peek().network;
        if network_changed {
            dioxus_logger::tracing::info!("switching network to {}", saved.network);
            contract.set_network(saved.network);
        }
        let network = saved.network;
        app_state_mut.settings.set(saved);
        notify_success(&toasts, "Settings saved successfully", NoticeOptions::default());
        if network_changed {
            let opts = NoticeOptions::description("Explorer links and contract data follow it.");
            notify_warning(&toasts, format!("Switched to {network}"), opts);
        }
    };

    let export = move |_: MouseEvent| {
        let json = match draft.peek().saved().to_json() {
            Ok(json) => json,
            Err(e) => {
                notify_error(&toasts, "Export failed", NoticeOptions::description(e.to_string()));
                return;
            }
        };
        spawn(async move {
            let copied = compat::clipboard_set(json).await;
            notify_copy_result(&toasts, copied);
        });
    };

    let import = move |_: MouseEvent| {
        spawn(async move {
            let text = match compat::read_file("json").await {
                Ok(Some(text)) => text,
                Ok(None) => return,
                Err(e) => {
                    notify_error(&toasts, "Import failed", NoticeOptions::description(e));
                    return;
                }
            };
            match DashboardSettings::from_json(&text) {
                Ok(imported) => {
                    draft.write().current = imported;
                    notify_info(
                        &toasts,
                        "Settings imported",
                        NoticeOptions::description("Review and save to apply them."),
                    );
                }
                Err(e) => {
                    let opts = NoticeOptions::description(e.to_string());
                    notify_error(&toasts, "Import failed", opts);
                }
            }
        });
    };

    let current = draft.read().current.clone();
    let unsaved = draft.read().has_unsaved_changes();

    rsx! {
        Card {
            header {
                style: "display: flex; justify-content: space-between; align-items: center;",
                hgroup {
                    style: "margin: 0;",
                    h2 { "Settings" }
                    p { "Network, refresh behaviour and display preferences." }
                }
                if unsaved {
                    span { class: "status-badge status-pending", "Unsaved changes" }
                }
            }

            form {
                onsubmit: move |evt| evt.prevent_default(),

                label {
                    "Network"
                    select {
                        name: "network",
                        onchange: move |evt| {
                            if let Ok(network) = Network::from_str(&evt.value()) {
                                draft.write().current.network = network;
                            }
                        },
                        for network in Network::iter() {
                            option {
                                value: "{network}",
                                selected: network == current.network,
                                "{network}"
                            }
                        }
                    }
                }

                fieldset {
                    label {
                        input {
                            r#type: "checkbox",
                            role: "switch",
                            name: "auto-refresh",
                            checked: current.auto_refresh,
                            onchange: move |evt| draft.write().current.auto_refresh = evt.checked(),
                        }
                        "Auto-refresh dashboard"
                    }
                }

                div {
                    class: "grid",
                    Input {
                        label: "Refresh interval (seconds)".to_string(),
                        name: "refresh-interval".to_string(),
                        input_type: "number".to_string(),
                        value: current.refresh_interval_secs.to_string(),
                        disabled: !current.auto_refresh,
                        error: (current.refresh_interval_secs < MIN_INTERVAL_SECS)
                            .then(|| format!("At least {MIN_INTERVAL_SECS} seconds")),
                        on_input: move |evt: FormEvent| {
                            if let Some(secs) = parse_field(&evt.value()) {
                                draft.write().current.refresh_interval_secs = secs;
                            }
                        },
                    }
                    Input {
                        label: "Contract status poll (seconds)".to_string(),
                        name: "status-poll".to_string(),
                        input_type: "number".to_string(),
                        value: current.status_poll_secs.to_string(),
                        error: (current.status_poll_secs < MIN_INTERVAL_SECS)
                            .then(|| format!("At least {MIN_INTERVAL_SECS} seconds")),
                        on_input: move |evt: FormEvent| {
                            if let Some(secs) = parse_field(&evt.value()) {
                                draft.write().current.status_poll_secs = secs;
                            }
                        },
                    }
                }

                div {
                    class: "grid",
                    label {
                        "Holders per page"
                        select {
                            name: "page-size",
                            onchange: move |evt| {
                                if let Some(size) = parse_field(&evt.value()) {
                                    draft.write().current.holders_page_size = size;
                                }
                            },
                            for size in PAGE_SIZES {
                                option {
                                    value: "{size}",
                                    selected: size == current.holders_page_size,
                                    "{size}"
                                }
                            }
                        }
                    }
                    Input {
                        label: "Visible notifications".to_string(),
                        name: "toast-max-visible".to_string(),
                        input_type: "number".to_string(),
                        value: current.toast_max_visible.to_string(),
                        error: (current.toast_max_visible == 0).then(|| "At least one".to_string()),
                        on_input: move |evt: FormEvent| {
                            if let Some(n) = parse_field(&evt.value()) {
                                draft.write().current.toast_max_visible = n;
                            }
                        },
                    }
                }

                if let Some(err) = save_error() {
                    p { class: "field-error", "{err}" }
                }
            }

            footer {
                class: "section-header",
                div {
                    style: "display: flex; gap: 0.5rem;",
                    Button {
                        disabled: !unsaved,
                        on_click: save,
                        "Save"
                    }
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        disabled: !unsaved,
                        on_click: move |_| {
                            draft.write().discard();
                            save_error.set(None);
                        },
                        "Discard"
                    }
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: move |_| draft.write().reset_to_defaults(),
                        "Reset to defaults"
                    }
                }
                div {
                    style: "display: flex; gap: 0.5rem;",
                    Button {
                        button_type: ButtonType::Contrast,
                        outline: true,
                        on_click: export,
                        "Export"
                    }
                    Button {
                        button_type: ButtonType::Contrast,
                        outline: true,
                        on_click: import,
                        "Import"
                    }
                }
            }
        }
    }
}
