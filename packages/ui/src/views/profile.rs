//! Profile screen: account details, avatar change, sign out and deletion.

use api::UserProfile;
use dioxus::prelude::*;

use crate::components::{Avatar, Button, ButtonVariant, Spinner};
use crate::icons::{FaArrowLeft, FaCalendar, FaCamera, FaEnvelope, FaRightFromBracket, FaUser};
use crate::{read_avatar, use_auth, use_services, Icon};

const NOT_PROVIDED: &str = "Not provided";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InfoIcon {
    Email,
    Name,
    Joined,
}

#[component]
fn InfoItemIcon(icon: InfoIcon) -> Element {
    match icon {
        InfoIcon::Email => rsx! { Icon { icon: FaEnvelope, width: 18, height: 18 } },
        InfoIcon::Name => rsx! { Icon { icon: FaUser, width: 18, height: 18 } },
        InfoIcon::Joined => rsx! { Icon { icon: FaCalendar, width: 18, height: 18 } },
    }
}

#[component]
fn InfoItem(icon: InfoIcon, label: String, value: Option<String>) -> Element {
    let value = value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());
    rsx! {
        div {
            class: "info-item",
            span { class: "info-item__icon", InfoItemIcon { icon } }
            div {
                class: "info-item__body",
                span { class: "info-item__label", "{label}" }
                span { class: "info-item__value", "{value}" }
            }
        }
    }
}

#[component]
pub fn ProfileView(
    on_signed_out: EventHandler<()>,
    on_deleted: EventHandler<()>,
    on_back: EventHandler<()>,
    on_sign_in: EventHandler<()>,
) -> Element {
    let auth = use_auth();

    let content = {
        let state = auth.read();
        match (&state.user, state.loading) {
            (_, true) => rsx! { Spinner {} },
            (Some(user), false) if state.is_signed_in() => rsx! {
                ProfileDetails { user: user.clone(), on_signed_out, on_deleted }
            },
            _ => rsx! {
                div {
                    class: "empty-state",
                    p { "Sign in to see your profile." }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| on_sign_in.call(()),
                        "Sign In"
                    }
                }
            },
        }
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
fn ProfileDetails(
    user: UserProfile,
    on_signed_out: EventHandler<()>,
    on_deleted: EventHandler<()>,
) -> Element {
    let services = use_services();
    let mut auth = use_auth();
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let change_avatar = {
        let identity = services.identity.clone();
        move |evt: FormEvent| {
            let identity = identity.clone();
            spawn(async move {
                let image = match read_avatar(&evt).await {
                    Ok(Some(image)) => image,
                    Ok(None) => return,
                    Err(message) => {
                        error.set(Some(message));
                        return;
                    }
                };
                busy.set(true);
                error.set(None);
                let session = auth.read().session.clone();
                match api::auth::update_profile_image(&identity, &session, image).await {
                    Ok(updated) => auth.write().user = Some(updated),
                    Err(e) => {
                        tracing::error!("Failed to update the profile image: {}", e);
                        error.set(Some("Failed to update profile image. Please try again.".to_string()));
                    }
                }
                busy.set(false);
            });
        }
    };

    let sign_out = {
        let identity = services.identity.clone();
        move |_: MouseEvent| {
            let identity = identity.clone();
            spawn(async move {
                busy.set(true);
                error.set(None);
                let session = auth.read().session.clone();
                match api::auth::sign_out(&identity, &session).await {
                    Ok(next) => {
                        busy.set(false);
                        let state = auth.read().with_session(next);
                        auth.set(state);
                        on_signed_out.call(());
                    }
                    Err(e) => {
                        tracing::error!("Error signing out: {}", e);
                        busy.set(false);
                        error.set(Some("Failed to sign out. Please try again.".to_string()));
                    }
                }
            });
        }
    };

    let delete_account = {
        let identity = services.identity.clone();
        move |_: MouseEvent| {
            let identity = identity.clone();
            spawn(async move {
                busy.set(true);
                error.set(None);
                let session = auth.read().session.clone();
                match api::auth::delete_account(&identity, &session).await {
                    Ok(next) => {
                        busy.set(false);
                        confirm_delete.set(false);
                        let state = auth.read().with_session(next);
                        auth.set(state);
                        on_deleted.call(());
                    }
                    Err(e) => {
                        tracing::error!("Error deleting account: {}", e);
                        busy.set(false);
                        confirm_delete.set(false);
                        error.set(Some("Failed to delete account. Please try again.".to_string()));
                    }
                }
            });
        }
    };

    let display_name = user.display_name();
    let full_name = user.full_name().unwrap_or_else(|| display_name.clone());

    rsx! {
        div {
            class: "profile",
            label {
                class: "profile__avatar",
                Avatar { image_url: user.image_url.clone(), name: display_name.clone(), size: 96 }
                span { class: "profile__avatar-badge", Icon { icon: FaCamera, width: 14, height: 14 } }
                input {
                    class: "avatar-picker__input",
                    r#type: "file",
                    accept: "image/*",
                    disabled: busy(),
                    onchange: change_avatar,
                }
            }
            h1 { class: "profile__name", "{full_name}" }
            if let Some(username) = user.username.as_ref().filter(|u| !u.is_empty()) {
                p { class: "profile__username", "@{username}" }
            }
        }

        if let Some(message) = error() {
            p { class: "form-error", "{message}" }
        }

        div {
            class: "info-list",
            InfoItem { icon: InfoIcon::Email, label: "Email", value: user.email.clone() }
            InfoItem { icon: InfoIcon::Name, label: "First Name", value: user.first_name.clone() }
            InfoItem { icon: InfoIcon::Name, label: "Last Name", value: user.last_name.clone() }
            InfoItem { icon: InfoIcon::Joined, label: "Joined", value: Some(user.joined()) }
        }

        div {
            class: "profile__actions",
            Button {
                variant: ButtonVariant::Secondary,
                disabled: busy(),
                onclick: sign_out,
                Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                "Logout"
            }
            Button {
                variant: ButtonVariant::Destructive,
                disabled: busy(),
                onclick: move |_| confirm_delete.set(true),
                "Delete Account"
            }
        }

        if confirm_delete() {
            div {
                class: "dialog-overlay",
                div {
                    class: "dialog",
                    h2 { class: "dialog__title", "Delete Account" }
                    p {
                        class: "dialog__text",
                        "Are you sure you want to delete your account? This action cannot be undone."
                    }
                    div {
                        class: "dialog__actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: busy(),
                            onclick: move |_| confirm_delete.set(false),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: busy(),
                            onclick: delete_account,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
