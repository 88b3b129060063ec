//! Clerk Frontend API client in native mode.
//!
//! Native clients do not use cookies: every request carries `_is_native=1` and
//! the client token in the `Authorization` header, and every response may hand
//! back a refreshed token in the same header. The token lives in a
//! [`TokenCache`] so the device session survives restarts.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{
    ActiveSession, IdentityError, IdentityProvider, ProfileImage, SignInAttempt, SignUpAttempt,
    SignUpParams, TokenCache, UserProfile,
};
use crate::config::{ConfigError, IdentityConfig};

/// Every response wraps its payload in `response`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    long_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClientResource {
    #[serde(default)]
    sessions: Vec<SessionResource>,
    #[serde(default)]
    last_active_session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResource {
    id: String,
    status: String,
    user: Option<UserResource>,
}

#[derive(Debug, Deserialize)]
struct UserResource {
    id: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    primary_email_address_id: Option<String>,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    /// Milliseconds since the epoch
    created_at: i64,
}

#[derive(Debug, Deserialize)]
struct EmailAddress {
    id: String,
    email_address: String,
}

impl UserResource {
    fn into_profile(self) -> Result<UserProfile, IdentityError> {
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at)
            .ok_or_else(|| IdentityError::Malformed(format!("created_at {}", self.created_at)))?;
        let email = self
            .email_addresses
            .iter()
            .find(|e| Some(&e.id) == self.primary_email_address_id.as_ref())
            .or(self.email_addresses.first())
            .map(|e| e.email_address.clone());
        Ok(UserProfile {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email,
            image_url: self.image_url,
            created_at,
        })
    }
}

struct Inner {
    http: reqwest::Client,
    base: Url,
    tokens: Arc<dyn TokenCache>,
    active_session: Mutex<Option<String>>,
}

/// Handle to the identity provider. Cheap to clone.
#[derive(Clone)]
pub struct ClerkClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ClerkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkClient")
            .field("base", &self.inner.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ClerkClient {
    pub fn new(config: &IdentityConfig, tokens: Arc<dyn TokenCache>) -> Result<Self, ConfigError> {
        Self::with_base_url(config.frontend_api.clone(), tokens)
    }

    /// Point the client at an explicit Frontend API URL.
    pub fn with_base_url(base: Url, tokens: Arc<dyn TokenCache>) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base,
                tokens,
                active_session: Mutex::new(None),
            }),
        })
    }

    fn active_session(&self) -> Option<String> {
        self.inner
            .active_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn remember_session(&self, session_id: Option<&str>) {
        *self
            .inner
            .active_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = session_id.map(str::to_string);
    }

    fn request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder, IdentityError> {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|_| IdentityError::Transport(format!("invalid base URL {}", self.inner.base)))?
            .pop_if_empty()
            .push("v1")
            .extend(path);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("_is_native", "1");
            if let Some(session_id) = self.active_session() {
                query.append_pair("_clerk_session_id", &session_id);
            }
        }

        let mut builder = self.inner.http.request(method, url);
        if let Some(token) = self.inner.tokens.load() {
            builder = builder.header(AUTHORIZATION, token);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, IdentityError> {
        let response = builder
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if let Some(token) = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            self.inner.tokens.store(token);
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(IdentityError::Unauthorized);
        }

        let body: ErrorEnvelope = response.json().await.unwrap_or_default();
        Err(match body.errors.into_iter().next() {
            Some(err) => IdentityError::Rejected {
                code: err.code,
                message: err.long_message.filter(|m| !m.is_empty()).unwrap_or(err.message),
            },
            None => IdentityError::Rejected {
                code: status.as_u16().to_string(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, IdentityError> {
        let response = self.send(builder).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        Ok(envelope.response)
    }
}

impl IdentityProvider for ClerkClient {
    #[tracing::instrument(name = "clerk.create_sign_in", skip(self, password))]
    async fn create_sign_in(&self, identifier: &str, password: &str) -> Result<SignInAttempt, IdentityError> {
        let builder = self.request(Method::POST, &["client", "sign_ins"])?.form(&[
            ("identifier", identifier),
            ("password", password),
            ("strategy", "password"),
        ]);
        self.send_json(builder).await
    }

    #[tracing::instrument(name = "clerk.create_sign_up", skip_all, fields(email = %params.email_address))]
    async fn create_sign_up(&self, params: &SignUpParams) -> Result<SignUpAttempt, IdentityError> {
        let builder = self.request(Method::POST, &["client", "sign_ups"])?.form(params);
        self.send_json(builder).await
    }

    #[tracing::instrument(name = "clerk.prepare_verification", skip(self))]
    async fn prepare_email_verification(&self, sign_up_id: &str) -> Result<(), IdentityError> {
        let builder = self
            .request(Method::POST, &["client", "sign_ups", sign_up_id, "prepare_verification"])?
            .form(&[("strategy", "email_code")]);
        self.send(builder).await.map(|_| ())
    }

    #[tracing::instrument(name = "clerk.attempt_verification", skip(self, code))]
    async fn attempt_email_verification(&self, sign_up_id: &str, code: &str) -> Result<SignUpAttempt, IdentityError> {
        let builder = self
            .request(Method::POST, &["client", "sign_ups", sign_up_id, "attempt_verification"])?
            .form(&[("strategy", "email_code"), ("code", code)]);
        self.send_json(builder).await
    }

    #[tracing::instrument(name = "clerk.set_active", skip(self))]
    async fn set_active(&self, session_id: &str) -> Result<(), IdentityError> {
        let builder = self.request(Method::POST, &["client", "sessions", session_id, "touch"])?;
        self.send(builder).await?;
        self.remember_session(Some(session_id));
        Ok(())
    }

    #[tracing::instrument(name = "clerk.current_session", skip(self))]
    async fn current_session(&self) -> Result<Option<ActiveSession>, IdentityError> {
        if self.inner.tokens.load().is_none() {
            return Ok(None);
        }
        let builder = self.request(Method::GET, &["client"])?;
        let client: Option<ClientResource> = match self.send_json(builder).await {
            Ok(client) => client,
            Err(IdentityError::Unauthorized) => None,
            Err(e) => return Err(e),
        };
        let Some(client) = client else {
            self.remember_session(None);
            return Ok(None);
        };

        let ClientResource {
            sessions,
            last_active_session_id,
        } = client;
        let session = sessions
            .into_iter()
            .filter(|s| s.status == "active")
            .find(|s| last_active_session_id.is_none() || Some(&s.id) == last_active_session_id.as_ref());
        let Some(SessionResource {
            id,
            user: Some(user),
            ..
        }) = session
        else {
            self.remember_session(None);
            return Ok(None);
        };

        self.remember_session(Some(&id));
        Ok(Some(ActiveSession {
            session_id: id,
            user: user.into_profile()?,
        }))
    }

    #[tracing::instrument(name = "clerk.sign_out", skip(self))]
    async fn sign_out(&self, session_id: &str) -> Result<(), IdentityError> {
        let builder = self.request(Method::POST, &["client", "sessions", session_id, "remove"])?;
        self.send(builder).await?;
        self.remember_session(None);
        Ok(())
    }

    #[tracing::instrument(name = "clerk.delete_user", skip(self))]
    async fn delete_user(&self) -> Result<(), IdentityError> {
        let builder = self.request(Method::DELETE, &["me"])?;
        self.send(builder).await?;
        self.remember_session(None);
        self.inner.tokens.clear();
        Ok(())
    }

    #[tracing::instrument(name = "clerk.set_profile_image", skip_all, fields(file = %image.file_name))]
    async fn set_profile_image(&self, image: ProfileImage) -> Result<UserProfile, IdentityError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| IdentityError::Malformed(e.to_string()))?;
        let builder = self
            .request(Method::POST, &["me", "profile_image"])?
            .multipart(Form::new().part("file", part));
        let user: UserResource = self.send_json(builder).await?;
        user.into_profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryTokenCache;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_session_slot_survives_poisoned_lock() {
        let client = ClerkClient::with_base_url(
            Url::parse("https://clerk.test/").unwrap(),
            Arc::new(MemoryTokenCache::new()),
        )
        .unwrap();
        client.remember_session(Some("sess_1"));

        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = client.inner.active_session.lock().unwrap();
            panic!("panicked while holding the session lock");
        }));
        assert!(client.inner.active_session.is_poisoned());

        assert_eq!(client.active_session().as_deref(), Some("sess_1"));
        client.remember_session(None);
        assert_eq!(client.active_session(), None);
    }
}
