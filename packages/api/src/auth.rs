//! Authentication flows composed from identity-provider calls.
//!
//! Each flow takes the current [`SessionState`] and returns the next one, so a
//! failed call never leaves the UI in a half-updated state.

use thiserror::Error;

use crate::identity::{IdentityError, IdentityProvider, ProfileImage, SignUpParams, UserProfile};
use crate::session::{SessionState, TransitionError};

const GENERIC_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The sign-in attempt did not reach `complete`.
    #[error("sign-in attempt ended with status {0}")]
    Incomplete(String),
    /// The email code was not accepted.
    #[error("verification ended with status {0}")]
    VerificationFailed(String),
    #[error(transparent)]
    Provider(#[from] IdentityError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl AuthError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Incomplete(_) => "Sign in failed. Please try again.".to_string(),
            AuthError::VerificationFailed(_) => "Verification failed. Please try again.".to_string(),
            AuthError::Provider(IdentityError::Rejected { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            _ => GENERIC_MESSAGE.to_string(),
        }
    }
}

/// Pick up a session left on the device by a previous launch.
pub async fn restore_session<P: IdentityProvider>(
    provider: &P,
) -> Result<(SessionState, Option<UserProfile>), AuthError> {
    match provider.current_session().await? {
        Some(active) => Ok((
            SessionState::SignedIn {
                session_id: active.session_id,
            },
            Some(active.user),
        )),
        None => Ok((SessionState::SignedOut, None)),
    }
}

/// Password sign-in. Only a `complete` attempt activates a session.
pub async fn sign_in<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
    identifier: &str,
    password: &str,
) -> Result<SessionState, AuthError> {
    let attempt = provider.create_sign_in(identifier.trim(), password).await?;
    let session_id = match (attempt.status.is_complete(), attempt.created_session_id) {
        (true, Some(session_id)) => session_id,
        _ => {
            tracing::warn!("Sign-in attempt {} incomplete: {:?}", attempt.id, attempt.status);
            return Err(AuthError::Incomplete(attempt.status.into()));
        }
    };
    let next = state.signed_in(session_id.as_str())?;
    provider.set_active(&session_id).await?;
    Ok(next)
}

/// Create the account and send the email code.
pub async fn sign_up<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
    params: &SignUpParams,
) -> Result<SessionState, AuthError> {
    let attempt = provider.create_sign_up(params).await?;
    let next = state.await_verification(attempt.id.as_str(), params.email_address.as_str())?;
    provider.prepare_email_verification(&attempt.id).await?;
    Ok(next)
}

/// Submit the email code of a pending sign-up.
pub async fn verify_email<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
    code: &str,
) -> Result<SessionState, AuthError> {
    let sign_up_id = state
        .pending_sign_up()
        .ok_or(TransitionError {
            from: state.name(),
            action: "complete verification",
        })?
        .to_string();

    let attempt = provider
        .attempt_email_verification(&sign_up_id, code.trim())
        .await?;
    let session_id = match (attempt.status.is_complete(), attempt.created_session_id) {
        (true, Some(session_id)) => session_id,
        _ => return Err(AuthError::VerificationFailed(attempt.status.into())),
    };
    let next = state.verified(session_id.as_str())?;
    provider.set_active(&session_id).await?;
    Ok(next)
}

pub async fn sign_out<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
) -> Result<SessionState, AuthError> {
    let next = state.signed_out()?;
    if let Some(session_id) = state.session_id() {
        provider.sign_out(session_id).await?;
    }
    Ok(next)
}

/// Permanently delete the signed-in user's account.
pub async fn delete_account<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
) -> Result<SessionState, AuthError> {
    let next = state.signed_out()?;
    provider.delete_user().await?;
    Ok(next)
}

pub async fn update_profile_image<P: IdentityProvider>(
    provider: &P,
    state: &SessionState,
    image: ProfileImage,
) -> Result<UserProfile, AuthError> {
    if !state.is_signed_in() {
        return Err(TransitionError {
            from: state.name(),
            action: "update the profile image",
        }
        .into());
    }
    Ok(provider.set_profile_image(image).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{ActiveSession, AttemptStatus, SignInAttempt, SignUpAttempt};
    use chrono::Utc;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeIdentity {
        sign_in_status: Option<&'static str>,
        verify_status: Option<&'static str>,
        reject_with: Option<IdentityError>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeIdentity {
        fn record(&self, call: impl Into<String>) -> Result<(), IdentityError> {
            self.calls.borrow_mut().push(call.into());
            match &self.reject_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn user() -> UserProfile {
            UserProfile {
                id: "user_1".to_string(),
                username: Some("ada".to_string()),
                first_name: None,
                last_name: None,
                email: Some("ada@example.com".to_string()),
                image_url: None,
                created_at: Utc::now(),
            }
        }
    }

    fn status(raw: Option<&str>) -> AttemptStatus {
        AttemptStatus::from(raw.unwrap_or("complete").to_string())
    }

    impl IdentityProvider for FakeIdentity {
        async fn create_sign_in(&self, identifier: &str, _password: &str) -> Result<SignInAttempt, IdentityError> {
            self.record(format!("create_sign_in:{identifier}"))?;
            let status = status(self.sign_in_status);
            let created_session_id = status.is_complete().then(|| "sess_1".to_string());
            Ok(SignInAttempt {
                id: "sia_1".to_string(),
                status,
                created_session_id,
            })
        }

        async fn create_sign_up(&self, params: &SignUpParams) -> Result<SignUpAttempt, IdentityError> {
            self.record(format!("create_sign_up:{}", params.email_address))?;
            Ok(SignUpAttempt {
                id: "sua_1".to_string(),
                status: AttemptStatus::Other("missing_requirements".to_string()),
                created_session_id: None,
            })
        }

        async fn prepare_email_verification(&self, sign_up_id: &str) -> Result<(), IdentityError> {
            self.record(format!("prepare:{sign_up_id}"))
        }

        async fn attempt_email_verification(&self, sign_up_id: &str, code: &str) -> Result<SignUpAttempt, IdentityError> {
            self.record(format!("attempt:{sign_up_id}:{code}"))?;
            let status = status(self.verify_status);
            let created_session_id = status.is_complete().then(|| "sess_2".to_string());
            Ok(SignUpAttempt {
                id: sign_up_id.to_string(),
                status,
                created_session_id,
            })
        }

        async fn set_active(&self, session_id: &str) -> Result<(), IdentityError> {
            self.record(format!("set_active:{session_id}"))
        }

        async fn current_session(&self) -> Result<Option<ActiveSession>, IdentityError> {
            self.record("current_session")?;
            Ok(Some(ActiveSession {
                session_id: "sess_9".to_string(),
                user: Self::user(),
            }))
        }

        async fn sign_out(&self, session_id: &str) -> Result<(), IdentityError> {
            self.record(format!("sign_out:{session_id}"))
        }

        async fn delete_user(&self) -> Result<(), IdentityError> {
            self.record("delete_user")
        }

        async fn set_profile_image(&self, image: ProfileImage) -> Result<UserProfile, IdentityError> {
            self.record(format!("set_profile_image:{}", image.file_name))?;
            Ok(Self::user())
        }
    }

    #[tokio::test]
    async fn test_sign_in_complete_activates_session() {
        let identity = FakeIdentity::default();
        let next = sign_in(&identity, &SessionState::SignedOut, " ada@example.com ", "pw")
            .await
            .unwrap();

        assert_eq!(next.session_id(), Some("sess_1"));
        assert_eq!(
            identity.calls(),
            vec!["create_sign_in:ada@example.com", "set_active:sess_1"]
        );
    }

    #[tokio::test]
    async fn test_sign_in_incomplete_activates_nothing() {
        let identity = FakeIdentity {
            sign_in_status: Some("needs_second_factor"),
            ..Default::default()
        };
        let state = SessionState::SignedOut;
        let err = sign_in(&identity, &state, "ada", "pw").await.unwrap_err();

        assert_eq!(err.user_message(), "Sign in failed. Please try again.");
        assert_eq!(identity.calls(), vec!["create_sign_in:ada"]);
        assert_eq!(state, SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_provider_errors_surface_their_message() {
        let identity = FakeIdentity {
            reject_with: Some(IdentityError::Rejected {
                code: "form_password_incorrect".to_string(),
                message: "Password is incorrect. Try again, or use another method.".to_string(),
            }),
            ..Default::default()
        };
        let err = sign_in(&identity, &SessionState::SignedOut, "ada", "pw")
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Password is incorrect. Try again, or use another method."
        );

        let identity = FakeIdentity {
            reject_with: Some(IdentityError::Transport("connection reset".to_string())),
            ..Default::default()
        };
        let err = sign_in(&identity, &SessionState::SignedOut, "ada", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }

    #[tokio::test]
    async fn test_sign_up_then_verify() {
        let identity = FakeIdentity::default();
        let params = SignUpParams {
            email_address: "ada@example.com".to_string(),
            password: "secret-pass".to_string(),
            username: "ada".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let pending = sign_up(&identity, &SessionState::SignedOut, &params)
            .await
            .unwrap();
        assert_eq!(pending.pending_sign_up(), Some("sua_1"));

        let signed_in = verify_email(&identity, &pending, " 123456 ").await.unwrap();
        assert_eq!(signed_in.session_id(), Some("sess_2"));
        assert_eq!(
            identity.calls(),
            vec![
                "create_sign_up:ada@example.com",
                "prepare:sua_1",
                "attempt:sua_1:123456",
                "set_active:sess_2",
            ]
        );
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_verification_pending() {
        let identity = FakeIdentity {
            verify_status: Some("missing_requirements"),
            ..Default::default()
        };
        let pending = SessionState::SignedOut
            .await_verification("sua_1", "ada@example.com")
            .unwrap();

        let err = verify_email(&identity, &pending, "000000").await.unwrap_err();
        assert_eq!(err.user_message(), "Verification failed. Please try again.");
        assert!(!identity.calls().iter().any(|c| c.starts_with("set_active")));
    }

    #[tokio::test]
    async fn test_verify_without_pending_sign_up() {
        let identity = FakeIdentity::default();
        let err = verify_email(&identity, &SessionState::SignedOut, "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Transition(_)));
        assert!(identity.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_and_delete() {
        let identity = FakeIdentity::default();
        let signed_in = SessionState::SignedIn {
            session_id: "sess_1".to_string(),
        };

        assert_eq!(sign_out(&identity, &signed_in).await.unwrap(), SessionState::SignedOut);
        assert_eq!(
            delete_account(&identity, &signed_in).await.unwrap(),
            SessionState::SignedOut
        );
        assert_eq!(identity.calls(), vec!["sign_out:sess_1", "delete_user"]);

        // nothing to sign out of
        assert!(sign_out(&identity, &SessionState::SignedOut).await.is_err());
    }

    #[tokio::test]
    async fn test_restore_and_profile_image() {
        let identity = FakeIdentity::default();
        let (state, user) = restore_session(&identity).await.unwrap();
        assert_eq!(state.session_id(), Some("sess_9"));
        assert_eq!(user.unwrap().display_name(), "ada");

        let image = ProfileImage {
            file_name: "avatar.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(update_profile_image(&identity, &SessionState::SignedOut, image.clone())
            .await
            .is_err());
        update_profile_image(&identity, &state, image).await.unwrap();
        assert_eq!(
            identity.calls(),
            vec!["current_session", "set_profile_image:avatar.png"]
        );
    }
}
