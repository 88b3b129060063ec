//! Small building blocks shared by every screen.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Destructive,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "button button--primary",
            ButtonVariant::Secondary => "button button--secondary",
            ButtonVariant::Outline => "button button--outline",
            ButtonVariant::Destructive => "button button--destructive",
            ButtonVariant::Ghost => "button button--ghost",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] class: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "{variant.class()} {class}",
            disabled: disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Input(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes, extends = input)] attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "input",
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
            ..attributes,
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "label", r#for: "{html_for}", {children} }
    }
}

/// Selectable pill used for category and resource filters.
#[component]
pub fn Chip(label: String, active: bool, onclick: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: if active { "chip chip--active" } else { "chip" },
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
pub fn Spinner(#[props(default)] label: String) -> Element {
    rsx! {
        div {
            class: "spinner",
            div { class: "spinner__wheel" }
            if !label.is_empty() {
                p { class: "spinner__label", "{label}" }
            }
        }
    }
}

/// Error text with an optional retry button.
#[component]
pub fn ErrorState(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "error-state",
            p { class: "error-state__text", "{message}" }
            if let Some(retry) = on_retry {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| retry.call(()),
                    "Retry"
                }
            }
        }
    }
}

/// Round profile picture, or the user's initials when there is none.
#[component]
pub fn Avatar(image_url: Option<String>, name: String, #[props(default = 40)] size: u32) -> Element {
    let style = format!("width: {size}px; height: {size}px;");
    match image_url.filter(|url| !url.is_empty()) {
        Some(url) => rsx! {
            img { class: "avatar", style: "{style}", src: "{url}", alt: "{name}" }
        },
        None => {
            let initials = crate::text::initials(&name);
            rsx! {
                span { class: "avatar avatar--initials", style: "{style}", "{initials}" }
            }
        }
    }
}
