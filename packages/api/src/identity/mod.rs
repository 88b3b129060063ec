//! Identity provider boundary.
//!
//! Credential checks, session issuance and session persistence belong to the
//! hosted identity provider. This module only describes the operations the app
//! consumes ([`IdentityProvider`]) and the data it reads back.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod clerk;
mod token_cache;

pub use clerk::ClerkClient;
pub use token_cache::{FileTokenCache, MemoryTokenCache, TokenCache};

/// Status of a sign-in or sign-up attempt. Only `complete` means a session was
/// created; every other value is treated alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttemptStatus {
    Complete,
    Other(String),
}

impl From<String> for AttemptStatus {
    fn from(value: String) -> Self {
        if value == "complete" {
            AttemptStatus::Complete
        } else {
            AttemptStatus::Other(value)
        }
    }
}

impl From<AttemptStatus> for String {
    fn from(value: AttemptStatus) -> Self {
        match value {
            AttemptStatus::Complete => "complete".to_string(),
            AttemptStatus::Other(other) => other,
        }
    }
}

impl AttemptStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, AttemptStatus::Complete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInAttempt {
    pub id: String,
    pub status: AttemptStatus,
    #[serde(default)]
    pub created_session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpAttempt {
    pub id: String,
    pub status: AttemptStatus,
    #[serde(default)]
    pub created_session_id: Option<String>,
}

/// Form fields collected by the sign-up screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignUpParams {
    pub email_address: String,
    pub password: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Profile fields the app displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// First and last name joined, if either is set.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Name to greet the user with: full name, then username, then email.
    pub fn display_name(&self) -> String {
        self.full_name()
            .or_else(|| self.username.clone().filter(|u| !u.is_empty()))
            .or_else(|| self.email.clone())
            .unwrap_or_default()
    }

    /// Join date formatted for the profile screen.
    pub fn joined(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

/// The signed-in session found on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session_id: String,
    pub user: UserProfile,
}

/// Image picked for the profile avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("network error: {0}")]
    Transport(String),
    /// The provider refused the request (bad credentials, taken username, wrong code…).
    #[error("{message}")]
    Rejected { code: String, message: String },
    #[error("not signed in")]
    Unauthorized,
    #[error("malformed identity response: {0}")]
    Malformed(String),
}

/// Operations consumed from the identity provider.
pub trait IdentityProvider {
    fn create_sign_in(
        &self,
        identifier: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignInAttempt, IdentityError>>;
    fn create_sign_up(
        &self,
        params: &SignUpParams,
    ) -> impl Future<Output = Result<SignUpAttempt, IdentityError>>;
    fn prepare_email_verification(
        &self,
        sign_up_id: &str,
    ) -> impl Future<Output = Result<(), IdentityError>>;
    fn attempt_email_verification(
        &self,
        sign_up_id: &str,
        code: &str,
    ) -> impl Future<Output = Result<SignUpAttempt, IdentityError>>;
    /// Make `session_id` the active session on this device.
    fn set_active(&self, session_id: &str) -> impl Future<Output = Result<(), IdentityError>>;
    /// The active session, or `None` when signed out.
    fn current_session(&self) -> impl Future<Output = Result<Option<ActiveSession>, IdentityError>>;
    fn sign_out(&self, session_id: &str) -> impl Future<Output = Result<(), IdentityError>>;
    fn delete_user(&self) -> impl Future<Output = Result<(), IdentityError>>;
    fn set_profile_image(
        &self,
        image: ProfileImage,
    ) -> impl Future<Output = Result<UserProfile, IdentityError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> UserProfile {
        UserProfile {
            id: "user_1".to_string(),
            username: Some("ada".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = profile();
        assert_eq!(user.display_name(), "Ada Lovelace");

        user.last_name = None;
        assert_eq!(user.display_name(), "Ada");

        user.first_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "ada");

        user.username = None;
        assert_eq!(user.display_name(), "ada@example.com");
    }

    #[test]
    fn test_joined_format() {
        assert_eq!(profile().joined(), "Mar 7, 2024");
    }

    #[test]
    fn test_attempt_status_wire_values() {
        let attempt: SignInAttempt = serde_json::from_value(serde_json::json!({
            "id": "sia_1",
            "status": "needs_second_factor",
            "created_session_id": null
        }))
        .unwrap();
        assert!(!attempt.status.is_complete());
        assert_eq!(attempt.status, AttemptStatus::Other("needs_second_factor".to_string()));

        let status: AttemptStatus = serde_json::from_str("\"complete\"").unwrap();
        assert!(status.is_complete());
    }
}
