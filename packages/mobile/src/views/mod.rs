//! Route targets. Each wraps a shared screen and turns its callbacks into
//! navigation.

use dioxus::prelude::*;
use ui::views::{
    ConnectView, CourseDetailView, CoursesView, ProfileView, ProjectDetailView, ProjectsView,
    ResourcesView, SignInView, SignUpView,
};
use ui::{Tab, TabBar};

use crate::Route;

fn tab_route(tab: Tab) -> Route {
    match tab {
        Tab::Courses => Route::Courses {},
        Tab::Resources => Route::Resources {},
        Tab::Connect => Route::Connect {},
        Tab::Projects => Route::Projects {},
    }
}

#[component]
pub fn TabLayout() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();
    let active = match route {
        Route::Resources {} => Tab::Resources,
        Route::Connect {} => Tab::Connect,
        Route::Projects {} => Tab::Projects,
        _ => Tab::Courses,
    };

    rsx! {
        Outlet::<Route> {}
        TabBar {
            active,
            on_select: move |tab: Tab| {
                nav.replace(tab_route(tab));
            },
        }
    }
}

#[component]
pub fn Courses() -> Element {
    let nav = use_navigator();
    rsx! {
        CoursesView {
            on_open_course: move |course_id: String| {
                nav.push(Route::CourseDetail { course_id });
            },
            on_sign_in: move |_| {
                nav.push(Route::SignIn {});
            },
            on_profile: move |_| {
                nav.push(Route::Profile {});
            },
        }
    }
}

#[component]
pub fn Resources() -> Element {
    rsx! { ResourcesView {} }
}

#[component]
pub fn Connect() -> Element {
    rsx! { ConnectView {} }
}

#[component]
pub fn Projects() -> Element {
    let nav = use_navigator();
    rsx! {
        ProjectsView {
            on_open_project: move |project_id: String| {
                nav.push(Route::ProjectDetail { project_id });
            },
        }
    }
}

#[component]
pub fn CourseDetail(course_id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        CourseDetailView {
            course_id,
            on_back: move |_| {
                nav.go_back();
            },
        }
    }
}

#[component]
pub fn ProjectDetail(project_id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ProjectDetailView {
            project_id,
            on_back: move |_| {
                nav.go_back();
            },
        }
    }
}

#[component]
pub fn SignIn() -> Element {
    let nav = use_navigator();
    rsx! {
        SignInView {
            on_signed_in: move |_| {
                nav.replace(Route::Courses {});
            },
            on_sign_up: move |_| {
                nav.replace(Route::SignUp {});
            },
        }
    }
}

#[component]
pub fn SignUp() -> Element {
    let nav = use_navigator();
    rsx! {
        SignUpView {
            on_signed_up: move |_| {
                nav.replace(Route::Courses {});
            },
            on_sign_in: move |_| {
                nav.replace(Route::SignIn {});
            },
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();
    rsx! {
        ProfileView {
            on_signed_out: move |_| {
                nav.replace(Route::SignIn {});
            },
            on_deleted: move |_| {
                nav.replace(Route::SignUp {});
            },
            on_back: move |_| {
                nav.go_back();
            },
            on_sign_in: move |_| {
                nav.push(Route::SignIn {});
            },
        }
    }
}
