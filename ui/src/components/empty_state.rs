use dioxus::prelude::*;

/// Placeholder for screens or tables with nothing to show yet.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] icon: Option<String>,
    #[props(default)] action: Option<Element>,
) -> Element {
    rsx! {
        div {
            class: "empty-state",
            if let Some(icon) = icon {
                div { class: "empty-state-icon", "{icon}" }
            }
            h4 { "{title}" }
            if let Some(description) = description {
                p { "{description}" }
            }
            if let Some(action) = action {
                div { {action} }
            }
        }
    }
}
