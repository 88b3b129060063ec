use dioxus::prelude::*;

use crate::icons::{FaFacebook, FaGithub, FaInstagram, FaLinkedin, FaTwitter, FaYoutube};
use crate::links::{Social, SOCIAL_LINKS};
use crate::{open_link, Icon};

#[component]
fn SocialIcon(network: Social) -> Element {
    match network {
        Social::Facebook => rsx! { Icon { icon: FaFacebook, width: 22, height: 22 } },
        Social::Github => rsx! { Icon { icon: FaGithub, width: 22, height: 22 } },
        Social::YouTube => rsx! { Icon { icon: FaYoutube, width: 22, height: 22 } },
        Social::Twitter => rsx! { Icon { icon: FaTwitter, width: 22, height: 22 } },
        Social::Instagram => rsx! { Icon { icon: FaInstagram, width: 22, height: 22 } },
        Social::LinkedIn => rsx! { Icon { icon: FaLinkedin, width: 22, height: 22 } },
    }
}

/// Connect tab: links to the community's social accounts.
#[component]
pub fn ConnectView() -> Element {
    let mut open_error = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            class: "screen",
            h1 { class: "screen__title", "Connect with Us" }
            p { class: "screen__subtitle", "Follow us on your favorite platforms to stay updated!" }
            div {
                class: "social-links",
                for link in SOCIAL_LINKS {
                    button {
                        key: "{link.name}",
                        class: "social-button",
                        onclick: move |_| open_error.set(open_link(link.url).err()),
                        SocialIcon { network: link.network }
                        span { "{link.name}" }
                    }
                }
            }
            if let Some(message) = open_error() {
                p { class: "form-error", "{message}" }
            }
            div {
                class: "forum",
                h2 { class: "section-title", "Community Forum" }
                div { class: "coming-soon", "Coming Soon" }
            }
        }
    }
}
