//! A set of reusable, lifetime-free Dioxus components for the Pico.css framework.
//! To use, ensure you have pico.min.css linked in your main application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use api::notify::notice::notify_copy_result;
use dioxus::prelude::*;

use crate::compat;
use crate::hooks::use_toasts::use_toasts;

//=============================================================================
// Layout Components
//=============================================================================

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A responsive grid layout.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

//=============================================================================
// Content Components
//=============================================================================

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element) -> Element {
    rsx! { article { {children} } }
}

/// A headline figure with a caption, for dashboard tiles.
#[component]
pub fn Stat(label: String, value: String, #[props(optional)] hint: Option<String>) -> Element {
    rsx! {
        article {
            class: "stat",
            small { "{label}" }
            h3 { "{value}" }
            if let Some(hint) = hint {
                small { class: "muted", "{hint}" }
            }
        }
    }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
    /// Shows Pico's spinner and disables the button.
    #[props(default = false)]
    busy: bool,
}

/// A versatile button component.
pub fn Button(props: ButtonProps) -> Element {
    let mut classes = Vec::new();
    match props.button_type {
        ButtonType::Primary => {}
        ButtonType::Secondary => classes.push("secondary"),
        ButtonType::Contrast => classes.push("contrast"),
    }
    if props.outline {
        classes.push("outline");
    }
    let class_str = classes.join(" ");
    rsx! {
        button {
            class: "{class_str}",
            disabled: props.disabled || props.busy,
            "aria-busy": if props.busy { "true" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct InputProps {
    label: String,
    name: String,
    value: String,
    on_input: EventHandler<FormEvent>,
    #[props(default = "text".to_string())]
    input_type: String,
    #[props(optional)]
    placeholder: Option<String>,
    #[props(default = false)]
    disabled: bool,
    /// Inline validation message. Marks the field invalid when set.
    #[props(optional)]
    error: Option<String>,
}

/// A labeled, controlled form input with an optional inline error.
pub fn Input(props: InputProps) -> Element {
    let invalid = if props.error.is_some() { "true" } else { "" };
    rsx! {
        label {
            "{props.label}"
            input {
                r#type: "{props.input_type}",
                name: "{props.name}",
                value: "{props.value}",
                placeholder: "{props.placeholder.as_deref().unwrap_or(\"\")}",
                disabled: props.disabled,
                "aria-invalid": "{invalid}",
                oninput: move |evt| props.on_input.call(evt),
            }
            if let Some(err) = &props.error {
                small { class: "field-error", "{err}" }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct CloseButtonProps {
    on_click: EventHandler<MouseEvent>,
}

/// Pico's "×" close link.
pub fn CloseButton(props: CloseButtonProps) -> Element {
    rsx! {
        a {
            href: "#",
            "aria-label": "Close",
            class: "close",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                props.on_click.call(evt);
            }
        }
    }
}

/// Copies `text_to_copy` and reports the outcome as a toast.
#[component]
pub fn CopyButton(text_to_copy: String) -> Element {
    let toasts = use_toasts();

    rsx! {
        a {
            href: "#",
            class: "copy-button",
            title: "Copy",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                evt.stop_propagation();
                let text = text_to_copy.clone();
                spawn(async move {
                    let copied = compat::clipboard_set(text).await;
                    notify_copy_result(&toasts, copied);
                });
            },
            "⧉"
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ModalProps {
    is_open: Signal<bool>,
    title: String,
    children: Element,
}

pub fn Modal(mut props: ModalProps) -> Element {
    rsx! {
        if (props.is_open)() {
            dialog {
                open: true,
                article {
                    header {
                        CloseButton {
                            on_click: move |_| props.is_open.set(false),
                        }
                        h3 { style: "margin-bottom: 0;", "{props.title}" }
                    }
                    {props.children}
                }
            }
        }
    }
}
