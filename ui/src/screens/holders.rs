//=============================================================================
// File: src/screens/holders.rs
//=============================================================================
use api::holders::format_bps;
use api::holders::HolderTable;
use api::holders::SortOrder;
use api::holders::PAGE_SIZES;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::address::Address;
use crate::components::amount::StxAmount;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::mock::HoldersSnapshot;

#[component]
fn HoldersTable(snapshot: HoldersSnapshot, mut table: Signal<HolderTable>) -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let my_address = app_state_mut.wallet.read().address().map(str::to_string);

    let page = table
        .read()
        .view(&snapshot.holders, snapshot.supply, snapshot.pool);
    let order = table.read().order();
    let query = table.read().query().to_string();
    let page_size = table.read().page_size();
    let arrow = match order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
    };
    let first_shown = if page.total_items == 0 { 0 } else { page.offset + 1 };
    let last_shown = page.offset + page.items.len();

    rsx! {
        div {
            class: "grid",
            input {
                r#type: "search",
                name: "holder-search",
                placeholder: "Search by address",
                "aria-label": "Search holders",
                value: "{query}",
                oninput: move |evt| table.write().set_query(evt.value()),
            }
            select {
                "aria-label": "Rows per page",
                onchange: move |evt| {
                    if let Ok(size) = evt.value().parse::<usize>() {
                        table.write().set_page_size(size);
                    }
                },
                for size in PAGE_SIZES {
                    option {
                        value: "{size}",
                        selected: size == page_size,
                        "{size} per page"
                    }
                }
            }
        }

        if page.items.is_empty() {
            EmptyState {
                title: "No holders found".to_string(),
                description: Some("No address matches the current search.".to_string()),
                icon: Some("🔍".to_string()),
            }
        } else {
            div {
                class: "overflow-auto",
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Address" }
                            th {
                                class: "sortable",
                                title: "Sort by balance",
                                onclick: move |_| table.write().toggle_sort(),
                                "Balance {arrow}"
                            }
                            th { "Share" }
                            th { "Entitlement" }
                        }
                    }
                    tbody {
                        for row in page.items.iter() {
                            tr {
                                key: "{row.holder.address}",
                                td { "{row.rank}" }
                                td {
                                    Address {
                                        address: row.holder.address.clone(),
                                        highlight: my_address.as_deref()
                                            == Some(row.holder.address.as_str()),
                                    }
                                }
                                td { "{row.holder.balance}" }
                                td { {format_bps(row.share_bps)} }
                                td {
                                    match row.entitlement {
                                        Some(amount) => rsx! { StxAmount { amount } },
                                        None => rsx! { span { class: "muted", "--" } },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        div {
            class: "pagination",
            small { class: "muted", "Showing {first_shown}-{last_shown} of {page.total_items}" }
            div {
                style: "display: flex; align-items: center; gap: 0.5rem;",
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    disabled: page.page <= 1,
                    on_click: move |_| {
                        let current = page.page;
                        table.write().set_page(current - 1);
                    },
                    "Prev"
                }
                span { "Page {page.page} of {page.total_pages}" }
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    disabled: page.page >= page.total_pages,
                    on_click: move |_| {
                        let current = page.page;
                        table.write().set_page(current + 1);
                    },
                    "Next"
                }
            }
        }
    }
}

#[component]
pub fn HoldersScreen() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let table = use_signal(|| HolderTable::new(app_state_mut.settings.peek().holders_page_size));

    let mut snapshot = use_resource(move || {
        let contract = app_state.contract.clone();
        async move { contract.fetch_holders().await }
    });

    rsx! {
        Card {
            hgroup {
                h2 { "Token Holders" }
                p { "Every FVT holder and the share of the dividend pool they are owed." }
            }
            match &*snapshot.read() {
                None => rsx! {
                    p { "Loading holders..." }
                    progress {}
                },
                Some(Ok(snapshot)) => rsx! {
                    HoldersTable { snapshot: snapshot.clone(), table }
                },
                Some(Err(e)) => rsx! {
                    h3 { "Error" }
                    p { "Failed to load holders: {e}" }
                    button {
                        onclick: move |_| snapshot.restart(),
                        "Retry"
                    }
                },
            }
        }
    }
}
