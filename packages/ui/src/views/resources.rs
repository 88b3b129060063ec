use catalog::cancel::cancellable;
use catalog::{Resource, ResourceFilter};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Chip, ErrorState, Spinner};
use crate::icons::FaDownload;
use crate::text::resource_count_line;
use crate::{open_link, use_cancellation, use_services, Icon};

/// Resources tab with the category filter chips.
#[component]
pub fn ResourcesView() -> Element {
    let services = use_services();
    let token = use_cancellation();
    let mut filter = use_signal(ResourceFilter::default);

    let mut resources = use_resource(move || {
        let catalog = services.catalog.clone();
        let token = token.clone();
        async move { cancellable(&token, catalog.list_resources()).await }
    });

    let all = match resources.read().clone() {
        None => return rsx! { Spinner { label: "Loading resources..." } },
        Some(Err(e)) if e.is_cancelled() => return rsx! {},
        Some(Err(e)) => {
            tracing::error!("Error getting resources: {}", e);
            return rsx! {
                div {
                    class: "screen",
                    ErrorState {
                        message: "Failed to fetch resources.",
                        on_retry: move |_| resources.restart(),
                    }
                }
            };
        }
        Some(Ok(all)) => all,
    };

    let active = filter();
    let visible: Vec<Resource> = active.apply(&all).into_iter().cloned().collect();
    let count_line = resource_count_line(visible.len(), active.label());

    rsx! {
        div {
            class: "screen",
            h1 { class: "screen__title", "Resources" }
            div {
                class: "chips",
                for option in ResourceFilter::options() {
                    Chip {
                        key: "{option.label()}",
                        label: option.label().to_string(),
                        active: option == active,
                        onclick: move |_| filter.set(option),
                    }
                }
            }
            p { class: "count-line", "{count_line}" }
            if visible.is_empty() {
                p { class: "empty-state", "No resources found for this category." }
            } else {
                div {
                    class: "resource-list",
                    for resource in visible {
                        ResourceCard { key: "{resource.id}", resource: resource.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ResourceCard(resource: Resource) -> Element {
    let mut open_error = use_signal(|| Option::<String>::None);
    let url = resource.url.clone();

    rsx! {
        div {
            class: "card resource-card",
            if !resource.image.is_empty() {
                img { class: "resource-card__image", src: "{resource.image}", alt: "{resource.title}" }
            }
            h3 { class: "card__title", "{resource.title}" }
            p { class: "card__description", "{resource.description}" }
            div {
                class: "resource-card__footer",
                span { class: "badge", "{resource.category.label()}" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| open_error.set(open_link(&url).err()),
                    Icon { icon: FaDownload, width: 14, height: 14 }
                    "Download"
                }
            }
            if let Some(message) = open_error() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}
