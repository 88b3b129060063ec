use catalog::cancel::cancellable;
use catalog::Course;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, ErrorState, Spinner};
use crate::icons::{FaArrowLeft, FaChevronDown, FaChevronUp, FaGithub, FaYoutube};
use crate::{open_link, use_cancellation, use_services, Icon};

#[component]
pub fn CourseDetailView(course_id: String, on_back: EventHandler<()>) -> Element {
    let services = use_services();
    let token = use_cancellation();

    let mut course = use_resource(use_reactive!(|(course_id,)| {
        let catalog = services.catalog.clone();
        let token = token.clone();
        async move { cancellable(&token, catalog.get_course(&course_id)).await }
    }));

    let content = match &*course.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) if e.is_cancelled() => rsx! {},
        Some(Err(e)) if e.is_not_found() => rsx! {
            p { class: "empty-state", "Video details not found." }
        },
        Some(Err(e)) => {
            tracing::error!("Failed to load video details: {}", e);
            rsx! {
                ErrorState {
                    message: "Failed to load video details.",
                    on_retry: move |_| course.restart(),
                }
            }
        }
        Some(Ok(found)) => rsx! { CourseDetail { course: found.clone() } },
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
fn CourseDetail(course: Course) -> Element {
    let mut show_description = use_signal(|| false);
    let mut open_error = use_signal(|| Option::<String>::None);

    let title = if course.title.trim().is_empty() {
        "Untitled".to_string()
    } else {
        course.title.clone()
    };
    let description = course
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description available.".to_string());
    let github_url = course.github_url.clone().filter(|u| !u.is_empty());
    let youtube_url = course.youtube_url();

    rsx! {
        if let Some(embed) = course.embed_url() {
            div {
                class: "video",
                iframe {
                    class: "video__player",
                    src: "{embed}",
                    allow: "autoplay; encrypted-media; picture-in-picture",
                    allowfullscreen: true,
                }
            }
        }
        div {
            class: "detail",
            button {
                class: "detail__title",
                onclick: move |_| show_description.set(!show_description()),
                h1 { "{title}" }
                if show_description() {
                    Icon { icon: FaChevronUp, width: 18, height: 18 }
                } else {
                    Icon { icon: FaChevronDown, width: 18, height: 18 }
                }
            }
            if show_description() {
                p { class: "detail__description", "{description}" }
            }
            div {
                class: "detail__links",
                if let Some(url) = github_url {
                    Button {
                        variant: ButtonVariant::Secondary,
                        class: "link-button link-button--github",
                        onclick: move |_| open_error.set(open_link(&url).err()),
                        Icon { icon: FaGithub, width: 18, height: 18 }
                        "View source on GitHub"
                    }
                }
                if let Some(url) = youtube_url {
                    Button {
                        variant: ButtonVariant::Destructive,
                        class: "link-button link-button--youtube",
                        onclick: move |_| open_error.set(open_link(&url).err()),
                        Icon { icon: FaYoutube, width: 18, height: 18 }
                        "View video on YouTube"
                    }
                }
            }
            if let Some(message) = open_error() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}
