//! Account creation followed by the email-code step.

use api::{ProfileImage, SignUpParams};
use dioxus::prelude::*;

use crate::components::{Avatar, Button, ButtonVariant, Input, Label};
use crate::{read_avatar, refresh_user, use_auth, use_services, AuthState};

#[component]
pub fn SignUpView(on_signed_up: EventHandler<()>, on_sign_in: EventHandler<()>) -> Element {
    let auth = use_auth();
    let avatar = use_signal(|| Option::<ProfileImage>::None);

    let pending_email = match &auth.read().session {
        api::SessionState::PendingVerification { email, .. } => Some(email.clone()),
        _ => None,
    };

    let content = match pending_email {
        Some(email) => rsx! {
            VerifyEmailForm { email, avatar, on_verified: on_signed_up }
        },
        None => rsx! {
            SignUpForm { avatar, on_sign_in }
        },
    };

    rsx! {
        div { class: "screen screen--auth", {content} }
    }
}

#[component]
fn SignUpForm(avatar: Signal<Option<ProfileImage>>, on_sign_in: EventHandler<()>) -> Element {
    let mut avatar = avatar;
    let services = use_services();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let pick_avatar = move |evt: FormEvent| {
        spawn(async move {
            match read_avatar(&evt).await {
                Ok(Some(image)) => {
                    error.set(None);
                    avatar.set(Some(image));
                }
                Ok(None) => {}
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let handle_sign_up = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = services.identity.clone();
        spawn(async move {
            error.set(None);

            let params = SignUpParams {
                email_address: email().trim().to_string(),
                password: password(),
                username: username().trim().to_string(),
                first_name: first_name().trim().to_string(),
                last_name: last_name().trim().to_string(),
            };
            if params.email_address.is_empty() || params.password.is_empty() {
                error.set(Some("Please enter your email and password.".to_string()));
                return;
            }

            loading.set(true);
            let session = auth.read().session.clone();
            match api::auth::sign_up(&identity, &session, &params).await {
                Ok(next) => {
                    loading.set(false);
                    let state = auth.read().with_session(next);
                    auth.set(state);
                }
                Err(err) => {
                    tracing::error!("Sign up failed: {}", err);
                    loading.set(false);
                    error.set(Some(err.user_message()));
                }
            }
        });
    };

    let preview = avatar
        .read()
        .as_ref()
        .map(|image| image.file_name.clone())
        .unwrap_or_default();

    rsx! {
        h1 { class: "screen__title", "Create Account" }
        p { class: "screen__subtitle", "Join the community and start learning" }

        form {
            class: "form",
            onsubmit: handle_sign_up,

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            label {
                class: "avatar-picker",
                Avatar { image_url: None, name: "{first_name} {last_name}", size: 72 }
                span {
                    class: "avatar-picker__hint",
                    if preview.is_empty() { "Choose a profile photo" } else { "{preview}" }
                }
                input {
                    class: "avatar-picker__input",
                    r#type: "file",
                    accept: "image/*",
                    onchange: pick_avatar,
                }
            }

            Label { html_for: "sign-up-first-name", "First Name" }
            Input {
                id: "sign-up-first-name",
                placeholder: "First name",
                value: first_name(),
                oninput: move |evt: FormEvent| first_name.set(evt.value()),
            }

            Label { html_for: "sign-up-last-name", "Last Name" }
            Input {
                id: "sign-up-last-name",
                placeholder: "Last name",
                value: last_name(),
                oninput: move |evt: FormEvent| last_name.set(evt.value()),
            }

            Label { html_for: "sign-up-username", "Username" }
            Input {
                id: "sign-up-username",
                placeholder: "Username",
                autocomplete: "username",
                value: username(),
                oninput: move |evt: FormEvent| username.set(evt.value()),
            }

            Label { html_for: "sign-up-email", "Email" }
            Input {
                id: "sign-up-email",
                r#type: "email",
                placeholder: "you@example.com",
                autocomplete: "email",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }

            Label { html_for: "sign-up-password", "Password" }
            Input {
                id: "sign-up-password",
                r#type: "password",
                placeholder: "Password",
                autocomplete: "new-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }

            Button {
                variant: ButtonVariant::Primary,
                class: "form__submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Sign Up" }
            }
        }

        p {
            class: "form-footer",
            "Already have an account? "
            button {
                r#type: "button",
                class: "text-link",
                onclick: move |_| on_sign_in.call(()),
                "Sign In"
            }
        }
    }
}

#[component]
fn VerifyEmailForm(
    email: String,
    avatar: Signal<Option<ProfileImage>>,
    on_verified: EventHandler<()>,
) -> Element {
    let mut avatar = avatar;
    let services = use_services();
    let mut auth = use_auth();
    let mut code = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_verify = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = services.identity.clone();
        spawn(async move {
            error.set(None);
            if code().trim().is_empty() {
                error.set(Some("Please enter the code from your email.".to_string()));
                return;
            }

            loading.set(true);
            let session = auth.read().session.clone();
            let next = match api::auth::verify_email(&identity, &session, &code()).await {
                Ok(next) => next,
                Err(err) => {
                    tracing::error!("Email verification failed: {}", err);
                    loading.set(false);
                    error.set(Some(err.user_message()));
                    return;
                }
            };

            // The account exists now; a failed upload only costs the avatar.
            let picked = avatar.write().take();
            if let Some(image) = picked {
                if let Err(e) = api::auth::update_profile_image(&identity, &next, image).await {
                    tracing::warn!("Failed to upload the profile image: {}", e);
                }
            }

            refresh_user(&identity, auth).await;
            loading.set(false);
            on_verified.call(());
        });
    };

    let start_over = move |_: MouseEvent| {
        let next = auth.read().session.abandon_verification();
        match next {
            Ok(next) => auth.set(AuthState::default().with_session(next)),
            Err(e) => tracing::warn!("{}", e),
        }
    };

    rsx! {
        h1 { class: "screen__title", "Verify Your Email" }
        p { class: "screen__subtitle", "We sent a verification code to {email}" }

        form {
            class: "form",
            onsubmit: handle_verify,

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            Label { html_for: "verify-code", "Verification Code" }
            Input {
                id: "verify-code",
                inputmode: "numeric",
                autocomplete: "one-time-code",
                placeholder: "123456",
                value: code(),
                oninput: move |evt: FormEvent| code.set(evt.value()),
            }

            Button {
                variant: ButtonVariant::Primary,
                class: "form__submit",
                disabled: loading(),
                if loading() { "Verifying..." } else { "Verify Email" }
            }
        }

        p {
            class: "form-footer",
            button {
                r#type: "button",
                class: "text-link",
                disabled: loading(),
                onclick: start_over,
                "Use a different email"
            }
        }
    }
}
