//! Courses tab: greeting header and the category-filtered course list.

use catalog::cancel::cancellable;
use catalog::filter::filter_courses;
use catalog::models::format_duration;
use catalog::{Course, ALL_CATEGORY};
use dioxus::prelude::*;

use crate::components::{Avatar, Button, ButtonVariant, Chip, ErrorState, Spinner};
use crate::icons::{FaClock, FaStar};
use crate::text::{course_count_line, rating};
use crate::{use_auth, use_cancellation, use_services, Icon};

#[component]
pub fn CoursesView(
    on_open_course: EventHandler<String>,
    on_sign_in: EventHandler<()>,
    on_profile: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "screen",
            Greeting { on_sign_in, on_profile }
            Lessons { on_open_course }
        }
    }
}

/// Header with the user's name, or a sign-in button when signed out.
#[component]
pub fn Greeting(on_sign_in: EventHandler<()>, on_profile: EventHandler<()>) -> Element {
    let auth = use_auth();
    let state = auth();
    let name = state
        .user
        .as_ref()
        .filter(|_| state.is_signed_in())
        .map(|user| user.display_name());
    let image_url = state.user.as_ref().and_then(|user| user.image_url.clone());

    rsx! {
        div {
            class: "greeting",
            div {
                class: "greeting__texts",
                p { class: "greeting__hello", "Hi There !" }
                if let Some(name) = name.clone() {
                    h2 { class: "greeting__name", "{name}" }
                }
            }
            if state.loading {
                Spinner {}
            } else if let Some(name) = name {
                button {
                    class: "greeting__avatar",
                    onclick: move |_| on_profile.call(()),
                    Avatar { image_url, name }
                }
            } else {
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| on_sign_in.call(()),
                    "Sign In"
                }
            }
        }
    }
}

/// Category chips over the course list. Categories and courses load
/// concurrently; a failed category fetch still shows the courses.
#[component]
pub fn Lessons(on_open_course: EventHandler<String>) -> Element {
    let services = use_services();
    let token = use_cancellation();
    let mut selected = use_signal(|| ALL_CATEGORY.to_string());

    let mut lessons = use_resource(move || {
        let catalog = services.catalog.clone();
        let token = token.clone();
        async move { cancellable(&token, async { Ok(catalog.load_lessons().await) }).await }
    });

    let loaded = match lessons.read().clone() {
        None => return rsx! { Spinner { label: "Loading courses..." } },
        Some(Err(e)) if e.is_cancelled() => return rsx! {},
        Some(Err(e)) => {
            return rsx! {
                ErrorState { message: e.to_string(), on_retry: move |_| lessons.restart() }
            }
        }
        Some(Ok(loaded)) => loaded,
    };

    let category = selected();
    let body = match &loaded.courses {
        Err(e) => {
            tracing::error!("Courses unavailable: {}", e);
            rsx! {
                ErrorState {
                    message: "Failed to fetch courses.",
                    on_retry: move |_| lessons.restart(),
                }
            }
        }
        Ok(courses) => {
            let visible: Vec<Course> = filter_courses(courses, &category)
                .into_iter()
                .cloned()
                .collect();
            let count_line = course_count_line(visible.len(), &category);
            rsx! {
                p { class: "count-line", "{count_line}" }
                div {
                    class: "course-list",
                    for course in visible {
                        CourseCard { key: "{course.id}", course: course.clone(), on_open: on_open_course }
                    }
                }
            }
        }
    };

    rsx! {
        h2 { class: "section-title", "Our Lessons" }
        div {
            class: "chips",
            for name in loaded.categories.iter().cloned() {
                Chip {
                    key: "{name}",
                    label: name.clone(),
                    active: name == category,
                    onclick: {
                        let name = name.clone();
                        move |_| selected.set(name.clone())
                    },
                }
            }
        }
        {body}
    }
}

#[component]
fn CourseCard(course: Course, on_open: EventHandler<String>) -> Element {
    let duration = format_duration(course.duration);
    let stars = rating(course.rating);
    let id = course.id.clone();

    rsx! {
        div {
            class: "card course-card",
            img { class: "course-card__thumb", src: "{course.image}", alt: "{course.title}" }
            div {
                class: "course-card__body",
                h3 { class: "card__title", "{course.title}" }
                p { class: "course-card__category", "{course.category}" }
                div {
                    class: "course-card__footer",
                    span {
                        class: "course-card__rating",
                        Icon { icon: FaStar, width: 14, height: 14 }
                        "{stars}"
                    }
                    if !duration.is_empty() {
                        span {
                            class: "course-card__duration",
                            Icon { icon: FaClock, width: 14, height: 14 }
                            "{duration}"
                        }
                    }
                    Button { onclick: move |_| on_open.call(id.clone()), "Start" }
                }
            }
        }
    }
}
