//! Application configuration from environment variables.
//!
//! Values are read from the process environment after loading `.env`. A value
//! baked in at build time (`option_env!`) is used when the variable is absent at
//! runtime, so a packaged mobile build still knows its project identifiers.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use catalog::Collections;
use thiserror::Error;
use url::Url;

pub const ENDPOINT_VAR: &str = "APPWRITE_ENDPOINT";
pub const PROJECT_ID_VAR: &str = "APPWRITE_PROJECT_ID";
pub const PLATFORM_VAR: &str = "APPWRITE_PLATFORM";
pub const DATABASE_ID_VAR: &str = "APPWRITE_DATABASE_ID";
pub const CATEGORIES_COLLECTION_VAR: &str = "APPWRITE_CATEGORIES_COLLECTION_ID";
pub const COURSES_COLLECTION_VAR: &str = "APPWRITE_COURSES_COLLECTION_ID";
pub const PROJECTS_COLLECTION_VAR: &str = "APPWRITE_PROJECTS_COLLECTION_ID";
pub const RESOURCES_COLLECTION_VAR: &str = "APPWRITE_RESOURCES_COLLECTION_ID";
pub const PUBLISHABLE_KEY_VAR: &str = "CLERK_PUBLISHABLE_KEY";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
const DEFAULT_PLATFORM: &str = "com.oss.jsm";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Add {} to your .env", PUBLISHABLE_KEY_VAR)]
    MissingPublishableKey,
    #[error("{} is not a valid publishable key", PUBLISHABLE_KEY_VAR)]
    InvalidPublishableKey,
    #[error("invalid URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{} must be a whole number of seconds, got {:?}", REQUEST_TIMEOUT_VAR, .0)]
    InvalidTimeout(String),
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
}

/// Document-database settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppwriteConfig {
    pub endpoint: Url,
    pub project_id: String,
    /// Platform tag registered for this app in the backend console.
    pub platform: String,
    pub database_id: String,
    pub collections: Collections,
    /// `None` waits forever.
    pub request_timeout: Option<Duration>,
}

/// Identity-provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub publishable_key: String,
    /// Frontend API base, derived from the publishable key.
    pub frontend_api: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub appwrite: AppwriteConfig,
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Load from the environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| baked(name).map(str::to_string))
        })
    }

    /// Parse using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let publishable_key = get(PUBLISHABLE_KEY_VAR).ok_or(ConfigError::MissingPublishableKey)?;
        let frontend_api = frontend_api_from_key(&publishable_key)?;

        let endpoint_raw = get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|e| ConfigError::InvalidUrl {
            var: ENDPOINT_VAR,
            reason: e.to_string(),
        })?;

        let request_timeout = match get(REQUEST_TIMEOUT_VAR) {
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            appwrite: AppwriteConfig {
                endpoint,
                project_id: get(PROJECT_ID_VAR).unwrap_or_default(),
                platform: get(PLATFORM_VAR).unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
                database_id: get(DATABASE_ID_VAR).unwrap_or_default(),
                collections: Collections {
                    categories: get(CATEGORIES_COLLECTION_VAR).unwrap_or_default(),
                    courses: get(COURSES_COLLECTION_VAR).unwrap_or_default(),
                    projects: get(PROJECTS_COLLECTION_VAR).unwrap_or_default(),
                    resources: get(RESOURCES_COLLECTION_VAR).unwrap_or_default(),
                },
                request_timeout,
            },
            identity: IdentityConfig {
                publishable_key,
                frontend_api,
            },
        })
    }
}

/// Decode the Frontend API host from a publishable key of the form
/// `pk_<instance>_<base64(host + "$")>`.
pub fn frontend_api_from_key(key: &str) -> Result<Url, ConfigError> {
    let encoded = key
        .strip_prefix("pk_test_")
        .or_else(|| key.strip_prefix("pk_live_"))
        .ok_or(ConfigError::InvalidPublishableKey)?;
    let decoded = STANDARD_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .map_err(|_| ConfigError::InvalidPublishableKey)?;
    let decoded = String::from_utf8(decoded).map_err(|_| ConfigError::InvalidPublishableKey)?;
    let host = decoded
        .strip_suffix('$')
        .filter(|h| !h.is_empty())
        .ok_or(ConfigError::InvalidPublishableKey)?;
    Url::parse(&format!("https://{host}")).map_err(|_| ConfigError::InvalidPublishableKey)
}

fn baked(name: &str) -> Option<&'static str> {
    match name {
        ENDPOINT_VAR => option_env!("APPWRITE_ENDPOINT"),
        PROJECT_ID_VAR => option_env!("APPWRITE_PROJECT_ID"),
        PLATFORM_VAR => option_env!("APPWRITE_PLATFORM"),
        DATABASE_ID_VAR => option_env!("APPWRITE_DATABASE_ID"),
        CATEGORIES_COLLECTION_VAR => option_env!("APPWRITE_CATEGORIES_COLLECTION_ID"),
        COURSES_COLLECTION_VAR => option_env!("APPWRITE_COURSES_COLLECTION_ID"),
        PROJECTS_COLLECTION_VAR => option_env!("APPWRITE_PROJECTS_COLLECTION_ID"),
        RESOURCES_COLLECTION_VAR => option_env!("APPWRITE_RESOURCES_COLLECTION_ID"),
        PUBLISHABLE_KEY_VAR => option_env!("CLERK_PUBLISHABLE_KEY"),
        REQUEST_TIMEOUT_VAR => option_env!("REQUEST_TIMEOUT_SECS"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // base64("clerk.example.dev$") without padding
    const KEY: &str = "pk_test_Y2xlcmsuZXhhbXBsZS5kZXYk";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_publishable_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[(PROJECT_ID_VAR, "proj")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingPublishableKey);

        let err = AppConfig::from_lookup(lookup(&[(PUBLISHABLE_KEY_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingPublishableKey);
    }

    #[test]
    fn test_defaults_and_unvalidated_collections() {
        let config = AppConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, KEY),
            (PROJECT_ID_VAR, "proj"),
            (DATABASE_ID_VAR, "db"),
            (COURSES_COLLECTION_VAR, "courses"),
        ]))
        .unwrap();

        assert_eq!(config.appwrite.endpoint.as_str(), "https://cloud.appwrite.io/v1");
        assert_eq!(config.appwrite.platform, "com.oss.jsm");
        assert_eq!(config.appwrite.collections.courses, "courses");
        assert_eq!(config.appwrite.collections.resources, "");
        assert_eq!(config.appwrite.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.identity.frontend_api.as_str(), "https://clerk.example.dev/");
    }

    #[test]
    fn test_timeout_parsing() {
        let config = AppConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, KEY),
            (REQUEST_TIMEOUT_VAR, "0"),
        ]))
        .unwrap();
        assert_eq!(config.appwrite.request_timeout, None);

        let err = AppConfig::from_lookup(lookup(&[
            (PUBLISHABLE_KEY_VAR, KEY),
            (REQUEST_TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("soon".to_string()));
    }

    #[test]
    fn test_publishable_key_decoding() {
        assert!(frontend_api_from_key("sk_test_abc").is_err());
        assert!(frontend_api_from_key("pk_test_!!!").is_err());
        // base64("no-dollar") lacks the terminator
        assert!(frontend_api_from_key("pk_live_bm8tZG9sbGFy").is_err());
        // padded form is accepted too
        let url = frontend_api_from_key("pk_live_Y2xlcmsuYWJjLmRldiQ=").unwrap();
        assert_eq!(url.host_str(), Some("clerk.abc.dev"));
    }
}
