// The client-side Dioxus application logic.

use api::settings::DashboardSettings;
use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
pub mod mock;
mod screens;

use api::admin::AdminActionLog;
use api::dividends::DividendBalances;
use api::dividends::DividendHistory;
use api::wallet::WalletStatus;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Button;
use components::pico::ButtonType;
use components::pico::Container;
use components::toaster::Toaster;
use components::wallet_connection::WalletConnection;
use hooks::use_toasts::use_toast_provider;
use screens::admin::AdminScreen;
use screens::dashboard::DashboardScreen;
use screens::holders::HoldersScreen;
use screens::landing::LandingScreen;
use screens::settings::SettingsScreen;

/// Enum to represent the different screens in our application.
#[derive(Clone, Copy, PartialEq, Default, strum::EnumIs)]
enum Screen {
    #[default]
    Landing,
    Dashboard,
    Holders,
    Admin,
    Settings,
}

impl Screen {
    /// Helper to get the display name for each screen.
    fn name(&self) -> &'static str {
        match self {
            Screen::Landing => "Home",
            Screen::Dashboard => "Dashboard",
            Screen::Holders => "Holders",
            Screen::Admin => "Admin",
            Screen::Settings => "Settings",
        }
    }
}

/// A list of all available screens for easy iteration.
const ALL_SCREENS: [Screen; 5] = [
    Screen::Landing,
    Screen::Dashboard,
    Screen::Holders,
    Screen::Admin,
    Screen::Settings,
];

/// The desktop navigation tabs component.
#[component]
fn Tabs(active_screen: Signal<Screen>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for screen in ALL_SCREENS {
                    li {
                        a {
                            href: "#",
                            class: if active_screen() == screen { "active-tab" } else { "" },
                            "aria-current": if active_screen() == screen {
                                "page"
                            } else {
                                "false"
                            },
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

/// The narrow-screen "hamburger" dropdown menu.
#[component]
fn HamburgerMenu(active_screen: Signal<Screen>) -> Element {
    let mut is_open = use_signal(|| false);

    rsx! {
        div {
            class: "hamburger-menu-container",
            Button {
                button_type: ButtonType::Secondary,
                outline: true,
                on_click: move |_| is_open.toggle(),
                "≡"
            }
            if is_open() {
                div {
                    class: "menu-backdrop",
                    onclick: move |_| is_open.set(false),
                }
                article {
                    class: "custom-dropdown-menu",
                    for screen in ALL_SCREENS {
                        a {
                            class: if active_screen() == screen {
                                "custom-dropdown-item active-tab"
                            } else {
                                "custom-dropdown-item"
                            },
                            href: "#",
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                                is_open.set(false);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let app_css = r#"
    * { box-sizing: border-box; }

    html, body { height: 100%; margin: 0; }

    .app-main-container { min-height: 100vh; display: flex; flex-direction: column; }
    .app-main-container header { padding: 0 1rem; --pico-nav-element-spacing-vertical: 0.5rem; }
    .app-main-container .content { flex: 1; padding: 0 1rem 2rem; }

    .brand { margin: 0; font-size: 1.4rem; }
    .muted { color: var(--pico-muted-color); }

    /* --- NAVIGATION --- */
    .tab-menu a.active-tab {
        color: var(--pico-primary) !important;
        border-bottom: 3px solid var(--pico-primary);
        border-radius: 0;
    }
    .tab-menu a:not(.active-tab) {
        color: var(--pico-muted-color); border-bottom: 3px solid transparent;
    }
    .hamburger-menu-container { display: none; position: relative; }
    .menu-backdrop { position: fixed; inset: 0; z-index: 10; }
    .custom-dropdown-menu {
        position: absolute; right: 0; z-index: 11; min-width: 12rem; padding: 0.5rem 0;
    }
    .custom-dropdown-item { display: block; padding: 0.5rem 1rem; }
    .custom-dropdown-item.active-tab {
        font-weight: bold; border-left: 4px solid var(--pico-primary);
    }

    @media (max-width: 768px) {
        .tab-menu { display: none; }
        .hamburger-menu-container { display: block; }
    }

    .wallet-connection { display: flex; align-items: center; gap: 0.75rem; }

    /* --- DASHBOARD --- */
    .stat h3 { margin: 0.25rem 0; }
    .field-error { color: var(--pico-del-color); }
    .address.mine code { outline: 1px solid var(--pico-primary); }
    .status-badge { padding: 0.1rem 0.5rem; border-radius: 1rem; font-size: 0.8rem; }
    .status-pending { background: var(--pico-muted-border-color); }
    .status-success { background: color-mix(in srgb, var(--pico-ins-color), transparent 75%); }
    .status-error { background: color-mix(in srgb, var(--pico-del-color), transparent 75%); }
    .pagination { display: flex; align-items: center; justify-content: space-between; gap: 1rem; }
    .sortable { cursor: pointer; user-select: none; }

    .empty-state {
        display: flex; flex-direction: column; align-items: center;
        padding: 2rem; text-align: center; color: var(--pico-muted-color);
        border: 2px dashed var(--pico-card-border-color);
        border-radius: var(--pico-border-radius); margin: 1rem 0;
    }
    .empty-state-icon { font-size: 3rem; margin-bottom: 1rem; }

    /* --- TOASTS --- */
    .toaster {
        position: fixed; bottom: 1rem; right: 1rem; z-index: 1000;
        display: flex; flex-direction: column; gap: 0.5rem;
        width: min(24rem, calc(100vw - 2rem));
    }
    .toast {
        margin: 0; padding: 0.75rem 1rem; border-left: 4px solid var(--pico-muted-border-color);
    }
    .toast p { margin: 0.25rem 0; }
    .toast .close { float: right; }
    .toast-success { border-left-color: var(--pico-ins-color); }
    .toast-error { border-left-color: var(--pico-del-color); }
    .toast-warning { border-left-color: #d9a400; }
    .toast-info, .toast-loading { border-left-color: var(--pico-primary); }
    .dividend-chart { display: flex; align-items: flex-end; gap: 0.5rem; padding-bottom: 1.5rem; }
    .dividend-bar {
        flex: 1; height: 100%; display: flex; flex-direction: column;
        justify-content: flex-end; align-items: center;
    }
    .dividend-bar-fill {
        width: 100%; min-height: 2px; background: var(--pico-primary); border-radius: 4px 4px 0 0;
    }
    .dividend-bar small { font-size: 0.7rem; white-space: nowrap; }
    .section-header {
        display: flex; justify-content: space-between; align-items: center;
        flex-wrap: wrap; gap: 1rem;
    }
    .toast-header { display: flex; align-items: center; gap: 0.4rem; margin: 0; padding: 0; }
    .tx-state.tx-confirmed { color: var(--pico-ins-color); }
    .tx-state.tx-failed { color: var(--pico-del-color); }
    .copy-button { text-decoration: none; }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{app_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // read once at startup; later edits go through the settings screen
    let settings = use_hook(|| {
        let settings = DashboardSettings::from_env();
        dioxus_logger::tracing::info!("settings: {:#?}", settings);
        settings
    });

    rsx! {
        LoadedApp { settings }
    }
}

/// This component holds the main app logic.
#[component]
fn LoadedApp(settings: DashboardSettings) -> Element {
    let startup = settings.clone();
    use_context_provider(|| AppState::new(startup));

    // Create signals for mutable state at the top level of the component.
    let settings_signal = use_signal(|| settings.clone());
    let wallet_signal = use_signal(WalletStatus::default);
    let balances_signal = use_signal(DividendBalances::default);
    let claims_signal = use_signal(DividendHistory::default);
    let distributions_signal = use_signal(Vec::new);
    let contract_status_signal = use_signal(|| None);
    let admin_log_signal = use_signal(AdminActionLog::default);
    let claim_in_flight_signal = use_signal(|| false);
    let admin_in_flight_signal = use_signal(|| false);

    use_context_provider(|| AppStateMut {
        settings: settings_signal,
        wallet: wallet_signal,
        balances: balances_signal,
        claims: claims_signal,
        distributions: distributions_signal,
        contract_status: contract_status_signal,
        admin_log: admin_log_signal,
        claim_in_flight: claim_in_flight_signal,
        admin_in_flight: admin_in_flight_signal,
    });

    let toasts = use_toast_provider(settings.toast_max_visible);

    // keep the toast limit in step with saved settings
    use_effect(move || {
        let max_visible = settings_signal.read().toast_max_visible;
        if toasts.queue().peek().max_visible() != max_visible {
            toasts.set_max_visible(max_visible);
        }
    });

    let active_screen = use_signal(Screen::default);
    use_context_provider(|| active_screen);

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li { h1 { class: "brand", "FinoVault" } }
                        }
                        ul {
                            li { Tabs { active_screen } }
                            li { HamburgerMenu { active_screen } }
                            li { WalletConnection {} }
                        }
                    }
                }
                div {
                    class: "content",
                    match active_screen() {
                        Screen::Landing => rsx! { LandingScreen {} },
                        Screen::Dashboard => rsx! { DashboardScreen {} },
                        Screen::Holders => rsx! { HoldersScreen {} },
                        Screen::Admin => rsx! { AdminScreen {} },
                        Screen::Settings => rsx! { SettingsScreen {} },
                    }
                }
            }
            Toaster {}
        }
    }
}
