use dioxus::prelude::*;

use crate::icons::{FaBookOpen, FaCode, FaFolderOpen, FaUserGroup};
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Courses,
    Resources,
    Connect,
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Courses, Tab::Resources, Tab::Connect, Tab::Projects];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Courses => "Courses",
            Tab::Resources => "Resources",
            Tab::Connect => "Connect",
            Tab::Projects => "Projects",
        }
    }
}

#[component]
fn TabIcon(tab: Tab) -> Element {
    match tab {
        Tab::Courses => rsx! { Icon { icon: FaBookOpen, width: 20, height: 20 } },
        Tab::Resources => rsx! { Icon { icon: FaFolderOpen, width: 20, height: 20 } },
        Tab::Connect => rsx! { Icon { icon: FaUserGroup, width: 20, height: 20 } },
        Tab::Projects => rsx! { Icon { icon: FaCode, width: 20, height: 20 } },
    }
}

/// Bottom navigation between the four main screens.
#[component]
pub fn TabBar(active: Tab, on_select: EventHandler<Tab>) -> Element {
    rsx! {
        nav {
            class: "tab-bar",
            for tab in Tab::ALL {
                button {
                    key: "{tab.label()}",
                    class: if tab == active { "tab-bar__item tab-bar__item--active" } else { "tab-bar__item" },
                    onclick: move |_| on_select.call(tab),
                    TabIcon { tab }
                    span { class: "tab-bar__label", "{tab.label()}" }
                }
            }
        }
    }
}
