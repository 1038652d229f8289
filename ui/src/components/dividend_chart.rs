//! Distribution history as a bar chart, with range and cumulative toggles.

use api::dividends::distribution_series;
use api::dividends::ChartMode;
use api::dividends::ChartRange;
use dioxus::prelude::*;
use strum::IntoEnumIterator;

use crate::app_state_mut::AppStateMut;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;

/// Chart area height in pixels.
const CHART_HEIGHT: u32 = 220;

fn mode_label(mode: ChartMode) -> &'static str {
    match mode {
        ChartMode::Cumulative => "Cumulative",
        ChartMode::Individual => "Individual",
    }
}

/// One drawn bar: its day label, hover text and height in percent of the
/// tallest bar.
struct Bar {
    key: String,
    day: String,
    tooltip: String,
    percent: u128,
}

#[component]
pub fn DividendChart() -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let mut range = use_signal(ChartRange::default);
    let mut mode = use_signal(ChartMode::default);

    let points = distribution_series(
        &app_state_mut.distributions.read(),
        range(),
        mode(),
        chrono::Utc::now(),
    );
    let peak = points
        .iter()
        .map(|p| p.amount.as_micro())
        .max()
        .unwrap_or(0)
        .max(1);
    let amount_label = match mode() {
        ChartMode::Cumulative => "Total",
        ChartMode::Individual => "Amount",
    };
    let bars: Vec<Bar> = points
        .iter()
        .map(|p| {
            let day = p.day.format("%b %d").to_string();
            Bar {
                key: p.day.to_string(),
                tooltip: format!("{day} {amount_label}: {} STX", p.amount),
                day,
                percent: p.amount.as_micro() * 100 / peak,
            }
        })
        .collect();

    rsx! {
        Card {
            header {
                class: "section-header",
                hgroup {
                    style: "margin: 0;",
                    h3 { "Distribution History" }
                    p { "Dividend distributions over time" }
                }
                div {
                    style: "display: flex; gap: 1rem; flex-wrap: wrap;",
                    div {
                        role: "group",
                        "aria-label": "Time range",
                        for option in ChartRange::iter() {
                            Button {
                                button_type: ButtonType::Secondary,
                                outline: option != range(),
                                on_click: move |_| range.set(option),
                                {option.label()}
                            }
                        }
                    }
                    div {
                        role: "group",
                        "aria-label": "View mode",
                        for option in ChartMode::iter() {
                            Button {
                                button_type: ButtonType::Secondary,
                                outline: option != mode(),
                                on_click: move |_| mode.set(option),
                                {mode_label(option)}
                            }
                        }
                    }
                }
            }

            if bars.is_empty() {
                EmptyState {
                    title: "No dividend data".to_string(),
                    description: Some(
                        "No dividend distributions found for the selected period.".to_string()
                    ),
                    icon: Some("💲".to_string()),
                }
            } else {
                div {
                    class: "dividend-chart",
                    role: "img",
                    "aria-label": "Dividend distributions per day",
                    style: "height: {CHART_HEIGHT}px;",
                    for bar in bars {
                        div {
                            key: "{bar.key}",
                            class: "dividend-bar",
                            title: "{bar.tooltip}",
                            div {
                                class: "dividend-bar-fill",
                                style: "height: {bar.percent}%;",
                            }
                            small { "{bar.day}" }
                        }
                    }
                }
            }
        }
    }
}
