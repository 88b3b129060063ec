//! Email/password sign-in form.

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::{refresh_user, use_auth, use_services};

#[component]
pub fn SignInView(on_signed_in: EventHandler<()>, on_sign_up: EventHandler<()>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_sign_in = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = services.identity.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Please enter your email and password.".to_string()));
                return;
            }

            loading.set(true);
            let session = auth.read().session.clone();
            match api::auth::sign_in(&identity, &session, &e, &p).await {
                Ok(_) => {
                    refresh_user(&identity, auth).await;
                    loading.set(false);
                    on_signed_in.call(());
                }
                Err(err) => {
                    tracing::error!("Sign in failed: {}", err);
                    loading.set(false);
                    error.set(Some(err.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "screen screen--auth",
            h1 { class: "screen__title", "Welcome Back" }
            p { class: "screen__subtitle", "Sign in to continue learning" }

            form {
                class: "form",
                onsubmit: handle_sign_in,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                Label { html_for: "sign-in-email", "Email" }
                Input {
                    id: "sign-in-email",
                    r#type: "email",
                    placeholder: "you@example.com",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                Label { html_for: "sign-in-password", "Password" }
                Input {
                    id: "sign-in-password",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "form__submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign In" }
                }
            }

            p {
                class: "form-footer",
                "Don't have an account? "
                button {
                    r#type: "button",
                    class: "text-link",
                    onclick: move |_| on_sign_up.call(()),
                    "Sign Up"
                }
            }
        }
    }
}
