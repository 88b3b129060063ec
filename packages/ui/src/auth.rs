//! Authentication context and hooks for the UI.

use api::{auth, ClerkClient, SessionState, UserProfile};
use dioxus::prelude::*;

use crate::services::use_services;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: SessionState,
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: SessionState::SignedOut,
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    /// Move to `session`, dropping the cached user when signing out.
    pub fn with_session(&self, session: SessionState) -> Self {
        let user = if session.is_signed_in() {
            self.user.clone()
        } else {
            None
        };
        Self {
            session,
            user,
            loading: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Re-read the session and user from the identity provider. Called on launch
/// and after every flow that changes who is signed in.
pub async fn refresh_user(identity: &ClerkClient, mut auth_state: Signal<AuthState>) {
    match auth::restore_session(identity).await {
        Ok((session, user)) => auth_state.set(AuthState {
            session,
            user,
            loading: false,
        }),
        Err(e) => {
            tracing::error!("Failed to load the current session: {}", e);
            auth_state.set(AuthState::signed_out());
        }
    }
}

/// Provider component that restores the device session on launch.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let auth_state = use_context_provider(|| Signal::new(AuthState::default()));
    let services = use_services();

    let _ = use_resource(move || {
        let identity = services.identity.clone();
        async move { refresh_user(&identity, auth_state).await }
    });

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: "user_1".to_string(),
            username: Some("ada".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
            email: Some("ada@example.com".to_string()),
            image_url: None,
            created_at: "2024-03-07T12:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_with_session_keeps_user_while_signed_in() {
        let state = AuthState {
            session: SessionState::SignedIn {
                session_id: "sess_1".to_string(),
            },
            user: Some(user()),
            loading: false,
        };
        let next = state.with_session(SessionState::SignedIn {
            session_id: "sess_2".to_string(),
        });
        assert_eq!(next.user, Some(user()));
        assert!(next.is_signed_in());
    }

    #[test]
    fn test_with_session_drops_user_on_sign_out() {
        let state = AuthState {
            session: SessionState::SignedIn {
                session_id: "sess_1".to_string(),
            },
            user: Some(user()),
            loading: true,
        };
        let next = state.with_session(SessionState::SignedOut);
        assert_eq!(next, AuthState::signed_out());
        assert!(!next.loading);
    }
}
