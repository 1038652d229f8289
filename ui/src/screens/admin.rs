//=============================================================================
// File: src/screens/admin.rs
//=============================================================================
use std::time::Duration;

use api::admin::execute_admin_action;
use api::admin::ActionId;
use api::admin::ActionLedger;
use api::admin::ActionPatch;
use api::admin::AdminActionKind;
use api::admin::AdminActionLog;
use api::admin::AdminOutcome;
use api::contract::ContractBackend;
use api::contract::ContractError;
use api::notify::notice::notify_error;
use api::notify::notice::notify_success;
use api::notify::NoticeOptions;
use api::stx_amount::MicroStx;
use api::validation::AdminRequest;
use api::validation::FormErrors;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::address::Address;
use crate::components::amount::StxAmount;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Input;
use crate::components::pico::Modal;
use crate::components::tx_hash::TxHash;
use crate::hooks::use_poller::use_poller;
use crate::hooks::use_toasts::use_toasts;
use crate::hooks::use_toasts::ToastHandle;
use crate::mock::MockContract;

/// The admin log signal as an [`ActionLedger`].
#[derive(Clone, Copy)]
struct AdminLogHandle(Signal<AdminActionLog>);

impl ActionLedger for AdminLogHandle {
    fn record(
        &self,
        kind: AdminActionKind,
        amount: Option<MicroStx>,
        recipient: Option<String>,
    ) -> ActionId {
        let mut log = self.0;
        let id = log.write().record(kind, amount, recipient);
        id
    }

    fn settle(&self, id: ActionId, patch: ActionPatch) {
        let mut log = self.0;
        if !log.write().settle(id, patch) {
            dioxus_logger::tracing::debug!("{} already dropped from history", id);
        }
    }
}

async fn load_status(
    contract: MockContract,
    mut state: AppStateMut,
) -> Result<(), ContractError> {
    let status = contract.fetch_status().await?;
    state.contract_status.set(Some(status));
    Ok(())
}

/// Runs `request` with every other admin control locked, and applies a
/// pause or unpause to the cached contract status.
///
/// The call runs on a root-owned task: switching tabs mid-call must not
/// leave the history entry pending. `clear` empties the form fields on
/// success, if the form is still mounted.
fn run_admin_request(
    contract: MockContract,
    toasts: ToastHandle,
    mut state: AppStateMut,
    request: AdminRequest,
    clear: Vec<Signal<String>>,
) {
    state.admin_in_flight.set(true);
    spawn_forever(async move {
        let ledger = AdminLogHandle(state.admin_log);
        let outcome: AdminOutcome =
            execute_admin_action(&contract, &toasts, &ledger, request).await;
        if let Some(paused) = outcome.paused_after() {
            if let Some(status) = state.contract_status.write().as_mut() {
                status.paused = paused;
            }
        }
        if outcome.status.is_success() {
            for mut field in clear {
                if let Ok(mut value) = field.try_write() {
                    value.clear();
                }
            }
        }
        state.admin_in_flight.set(false);
    });
}

fn form_error<E: ToString>(error: &Option<E>) -> Option<String> {
    error.as_ref().map(ToString::to_string)
}

#[component]
fn DepositForm(in_flight: Signal<bool>) -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();

    let mut amount = use_signal(String::new);
    let mut errors = use_signal(FormErrors::default);

    let submit = move |_: MouseEvent| {
        let request = match AdminRequest::deposit(&amount.peek()) {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FormErrors::default());
        let contract = app_state.contract.clone();
        run_admin_request(contract, toasts, app_state_mut, request, vec![amount]);
    };

    rsx! {
        Card {
            h3 { "Deposit Dividends" }
            p { class: "muted", "Send STX into the pool for holders to claim." }
            Input {
                label: "Amount (STX)".to_string(),
                name: "deposit-amount".to_string(),
                value: amount(),
                placeholder: "0.000000".to_string(),
                disabled: in_flight(),
                error: form_error(&errors.read().amount),
                on_input: move |evt: FormEvent| amount.set(evt.value()),
            }
            Button {
                disabled: in_flight(),
                on_click: submit,
                "Deposit"
            }
        }
    }
}

/// Mint or burn form; `kind` picks which.
#[component]
fn TokenForm(kind: AdminActionKind, in_flight: Signal<bool>) -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();

    let mut recipient = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut errors = use_signal(FormErrors::default);

    let (title, blurb, action) = match kind {
        AdminActionKind::Burn => ("Burn Tokens", "Destroy FVT held by an address.", "Burn"),
        _ => ("Mint Tokens", "Create new FVT for an address.", "Mint"),
    };

    let submit = move |_: MouseEvent| {
        let parsed = match kind {
            AdminActionKind::Burn => AdminRequest::burn(&recipient.peek(), &amount.peek()),
            _ => AdminRequest::mint(&recipient.peek(), &amount.peek()),
        };
        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FormErrors::default());
        let contract = app_state.contract.clone();
        run_admin_request(contract, toasts, app_state_mut, request, vec![recipient, amount]);
    };

    rsx! {
        Card {
            h3 { "{title}" }
            p { class: "muted", "{blurb}" }
            Input {
                label: "Recipient".to_string(),
                name: format!("{kind}-recipient"),
                value: recipient(),
                placeholder: "SP...".to_string(),
                disabled: in_flight(),
                error: form_error(&errors.read().recipient),
                on_input: move |evt: FormEvent| recipient.set(evt.value()),
            }
            Input {
                label: "Amount (FVT)".to_string(),
                name: format!("{kind}-amount"),
                value: amount(),
                placeholder: "0".to_string(),
                disabled: in_flight(),
                error: form_error(&errors.read().amount),
                on_input: move |evt: FormEvent| amount.set(evt.value()),
            }
            Button {
                button_type: if kind == AdminActionKind::Burn {
                    ButtonType::Contrast
                } else {
                    ButtonType::Primary
                },
                disabled: in_flight(),
                on_click: submit,
                "{action}"
            }
        }
    }
}

/// Pause/unpause with a confirmation dialog in front.
#[component]
fn PauseControl(paused: bool, in_flight: Signal<bool>) -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();
    let mut confirm_open = use_signal(|| false);

    let (label, question) = if paused {
        ("Unpause Contract", "Resume transfers, deposits and claims?")
    } else {
        ("Pause Contract", "Halt transfers, deposits and claims until unpaused?")
    };

    let confirm = move |_: MouseEvent| {
        confirm_open.set(false);
        let request = if paused { AdminRequest::Unpause } else { AdminRequest::Pause };
        let contract = app_state.contract.clone();
        run_admin_request(contract, toasts, app_state_mut, request, Vec::new());
    };

    rsx! {
        Button {
            button_type: if paused { ButtonType::Primary } else { ButtonType::Contrast },
            outline: !paused,
            disabled: in_flight(),
            on_click: move |_| confirm_open.set(true),
            "{label}"
        }
        Modal {
            is_open: confirm_open,
            title: label.to_string(),
            p { "{question}" }
            footer {
                style: "display: flex; justify-content: flex-end; gap: 1rem;",
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| confirm_open.set(false),
                    "Cancel"
                }
                Button {
                    on_click: confirm,
                    "Confirm"
                }
            }
        }
    }
}

#[component]
fn ActionHistory() -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let network = app_state_mut.network();
    let log = app_state_mut.admin_log.read();

    if log.is_empty() {
        return rsx! {
            EmptyState {
                title: "No admin actions yet".to_string(),
                description: Some(
                    "Deposits, mints, burns and pauses you make appear here.".to_string()
                ),
            }
        };
    }

    rsx! {
        div {
            class: "overflow-auto",
            table {
                thead { tr {
                    th { "Action" }
                    th { "Amount" }
                    th { "Recipient" }
                    th { "Status" }
                    th { "Transaction" }
                    th { "Time" }
                }}
                tbody {
                    for action in log.iter() {
                        tr {
                            key: "{action.id}",
                            td { "{action.kind}" }
                            td {
                                match action.amount {
                                    Some(amount) if action.kind == AdminActionKind::Deposit => {
                                        rsx! { StxAmount { amount } }
                                    }
                                    Some(amount) => rsx! { "{amount} FVT" },
                                    None => rsx! { "--" },
                                }
                            }
                            td {
                                match &action.recipient {
                                    Some(recipient) => {
                                        rsx! { Address { address: recipient.clone() } }
                                    }
                                    None => rsx! { "--" },
                                }
                            }
                            td {
                                span {
                                    class: "status-badge status-{action.status}",
                                    title: action.note.clone().unwrap_or_default(),
                                    "{action.status}"
                                }
                            }
                            td {
                                match &action.tx_id {
                                    Some(tx_id) => rsx! { TxHash { hash: tx_id.clone(), network } },
                                    None => rsx! { "--" },
                                }
                            }
                            td { {action.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminScreen() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let toasts = use_toasts();

    let in_flight = app_state_mut.admin_in_flight;
    let mut is_refreshing = use_signal(|| false);

    // the status decides ownership, so it loads before the owner check
    let contract = app_state.contract.clone();
    use_future(move || {
        let contract = contract.clone();
        async move {
            if let Err(e) = load_status(contract, app_state_mut).await {
                dioxus_logger::tracing::warn!("initial status load failed: {}", e);
            }
        }
    });

    let contract = app_state.contract.clone();
    use_poller(
        "contract status",
        move || Some(Duration::from_secs(app_state_mut.settings.peek().status_poll_secs)),
        move || {
            let contract = contract.clone();
            async move {
                if let Err(e) = load_status(contract, app_state_mut).await {
                    dioxus_logger::tracing::warn!("status poll failed: {}", e);
                }
            }
        },
    );

    let contract = app_state.contract.clone();
    let refresh = move |_: MouseEvent| {
        let contract = contract.clone();
        spawn(async move {
            is_refreshing.set(true);
            match load_status(contract, app_state_mut).await {
                Ok(()) => notify_success(&toasts, "Status refreshed", NoticeOptions::default()),
                Err(e) => notify_error(&toasts, e.to_string(), NoticeOptions::default()),
            };
            is_refreshing.set(false);
        });
    };

    if !app_state_mut.is_owner() {
        let loading = app_state_mut.contract_status.read().is_none();
        return rsx! {
            Card {
                if loading {
                    p { "Checking contract ownership..." }
                    progress {}
                } else {
                    EmptyState {
                        title: "Admin Access Required".to_string(),
                        description: Some(
                            "Connect the contract owner's wallet to manage FinoVault.".to_string()
                        ),
                        icon: Some("🔒".to_string()),
                    }
                }
            }
        };
    }

    let status = app_state_mut.contract_status.read().clone().unwrap_or_default();
    let supply = status
        .total_supply
        .map(|s| s.to_string())
        .unwrap_or_else(|| "--".to_string());
    let last_dividend = status
        .last_dividend_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Never".to_string());

    rsx! {
        hgroup {
            h2 { "Admin" }
            p { "Manage dividend deposits, token supply and the contract's pause switch." }
        }

        Card {
            header {
                style: "display: flex; justify-content: space-between; align-items: center;",
                strong { "Contract Status" }
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    busy: is_refreshing(),
                    on_click: refresh,
                    "Refresh"
                }
            }
            Grid {
                div {
                    small { class: "muted", "State" }
                    p {
                        span {
                            class: if status.paused {
                                "status-badge status-error"
                            } else {
                                "status-badge status-success"
                            },
                            if status.paused { "Paused" } else { "Active" }
                        }
                    }
                }
                div {
                    small { class: "muted", "Total Supply" }
                    p { "{supply} FVT" }
                }
                div {
                    small { class: "muted", "Contract" }
                    p {
                        match &status.contract_address {
                            Some(address) => rsx! { Address { address: address.clone() } },
                            None => rsx! { "--" },
                        }
                    }
                }
                div {
                    small { class: "muted", "Last Dividend" }
                    p { "{last_dividend}" }
                }
            }
            footer {
                PauseControl { paused: status.paused, in_flight }
            }
        }

        Grid {
            DepositForm { in_flight }
            TokenForm { kind: AdminActionKind::Mint, in_flight }
            TokenForm { kind: AdminActionKind::Burn, in_flight }
        }

        Card {
            h3 { "Action History" }
            ActionHistory {}
        }
    }
}
