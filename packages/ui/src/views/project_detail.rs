use catalog::cancel::cancellable;
use catalog::Project;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, ErrorState, Spinner};
use crate::icons::{FaArrowLeft, FaGithub, FaYoutube};
use crate::{open_link, use_cancellation, use_services, Icon};

#[component]
pub fn ProjectDetailView(project_id: String, on_back: EventHandler<()>) -> Element {
    let services = use_services();
    let token = use_cancellation();

    let mut project = use_resource(use_reactive!(|(project_id,)| {
        let catalog = services.catalog.clone();
        let token = token.clone();
        async move { cancellable(&token, catalog.get_project(&project_id)).await }
    }));

    let content = match &*project.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) if e.is_cancelled() => rsx! {},
        Some(Err(e)) if e.is_not_found() => rsx! {
            p { class: "empty-state", "Project not found" }
        },
        Some(Err(e)) => {
            tracing::error!("Error fetching project details: {}", e);
            rsx! {
                ErrorState {
                    message: "Failed to load project details.",
                    on_retry: move |_| project.restart(),
                }
            }
        }
        Some(Ok(found)) => rsx! { ProjectDetail { project: found.clone() } },
    };

    rsx! {
        div {
            class: "screen screen--detail",
            button {
                class: "back-button",
                onclick: move |_| on_back.call(()),
                Icon { icon: FaArrowLeft, width: 16, height: 16 }
                "Back"
            }
            {content}
        }
    }
}

#[component]
fn ProjectDetail(project: Project) -> Element {
    let mut open_error = use_signal(|| Option::<String>::None);
    let youtube_url = project.youtube_url.clone();
    let github_url = project.github_url.clone();

    rsx! {
        if !project.banner.is_empty() {
            img { class: "detail__banner", src: "{project.banner}", alt: "{project.title}" }
        }
        div {
            class: "detail",
            h1 { class: "detail__heading", "{project.title}" }
            p { class: "detail__description", "{project.description}" }
            if !project.technologies.is_empty() {
                h2 { class: "section-title", "Technologies" }
                div {
                    class: "tags",
                    for tech in project.technologies.iter() {
                        span { key: "{tech}", class: "tag", "{tech}" }
                    }
                }
            }
            div {
                class: "detail__links",
                if !youtube_url.is_empty() {
                    Button {
                        variant: ButtonVariant::Destructive,
                        class: "link-button link-button--youtube",
                        onclick: move |_| open_error.set(open_link(&youtube_url).err()),
                        Icon { icon: FaYoutube, width: 18, height: 18 }
                        "Watch Tutorial"
                    }
                }
                if !github_url.is_empty() {
                    Button {
                        variant: ButtonVariant::Secondary,
                        class: "link-button link-button--github",
                        onclick: move |_| open_error.set(open_link(&github_url).err()),
                        Icon { icon: FaGithub, width: 18, height: 18 }
                        "View Source on GitHub"
                    }
                }
            }
            if let Some(message) = open_error() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}
