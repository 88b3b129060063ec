use catalog::cancel::cancellable;
use catalog::Project;
use dioxus::prelude::*;

use crate::components::{ErrorState, Spinner};
use crate::text::overflow_marker;
use crate::{use_cancellation, use_services};

/// Technologies shown on a card before the `+N` marker.
const TECHNOLOGY_PREVIEW: usize = 3;

#[component]
pub fn ProjectsView(on_open_project: EventHandler<String>) -> Element {
    let services = use_services();
    let token = use_cancellation();

    let mut projects = use_resource(move || {
        let catalog = services.catalog.clone();
        let token = token.clone();
        async move { cancellable(&token, catalog.list_projects()).await }
    });

    let content = match &*projects.read() {
        None => rsx! { Spinner { label: "Loading projects..." } },
        Some(Err(e)) if e.is_cancelled() => rsx! {},
        Some(Err(e)) => {
            tracing::error!("Error getting projects: {}", e);
            rsx! {
                ErrorState {
                    message: "Failed to fetch projects.",
                    on_retry: move |_| projects.restart(),
                }
            }
        }
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "empty-state", "No projects yet." }
        },
        Some(Ok(list)) => {
            let list = list.clone();
            rsx! {
                div {
                    class: "project-list",
                    for project in list {
                        ProjectCard { key: "{project.id}", project: project.clone(), on_open: on_open_project }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "screen",
            h1 { class: "screen__title", "Tutorial Projects" }
            {content}
        }
    }
}

#[component]
fn ProjectCard(project: Project, on_open: EventHandler<String>) -> Element {
    let (shown, hidden) = project.technology_preview(TECHNOLOGY_PREVIEW);
    let shown = shown.to_vec();
    let more = overflow_marker(hidden);
    let id = project.id.clone();

    rsx! {
        button {
            class: "card project-card",
            onclick: move |_| on_open.call(id.clone()),
            if !project.banner.is_empty() {
                img { class: "project-card__banner", src: "{project.banner}", alt: "{project.title}" }
            }
            div {
                class: "project-card__body",
                h3 { class: "card__title", "{project.title}" }
                p { class: "card__description card__description--clamped", "{project.description}" }
                div {
                    class: "tags",
                    for tech in shown {
                        span { key: "{tech}", class: "tag", "{tech}" }
                    }
                    if let Some(more) = more {
                        span { class: "tag tag--more", "{more}" }
                    }
                }
            }
        }
    }
}
