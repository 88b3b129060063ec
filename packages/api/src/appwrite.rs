//! HTTP adapter for the hosted document database.
//!
//! [`AppwriteStore`] implements [`catalog::DocumentStore`] against the Databases
//! REST API. One instance is built at startup and cloned into every consumer;
//! it carries no per-user state (auth lives with the identity provider).

use catalog::{Document, DocumentList, DocumentStore, FetchError};
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::{AppwriteConfig, ConfigError};

const PROJECT_HEADER: &str = "x-appwrite-project";
const RESPONSE_FORMAT_HEADER: &str = "x-appwrite-response-format";
const RESPONSE_FORMAT: &str = "1.5.0";

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Clone, Debug)]
pub struct AppwriteStore {
    http: reqwest::Client,
    endpoint: Url,
    database_id: String,
}

impl AppwriteStore {
    /// Build the client bound to the configured project and platform.
    pub fn new(config: &AppwriteConfig) -> Result<Self, ConfigError> {
        let header = |value: &str| {
            HeaderValue::from_str(value).map_err(|e| ConfigError::HttpClient(e.to_string()))
        };
        let mut headers = HeaderMap::new();
        headers.insert(PROJECT_HEADER, header(&config.project_id)?);
        headers.insert(RESPONSE_FORMAT_HEADER, HeaderValue::from_static(RESPONSE_FORMAT));
        headers.insert(ORIGIN, header(&origin(&config.platform))?);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            database_id: config.database_id.clone(),
        })
    }

    fn documents_url(&self, collection_id: &str, document_id: Option<&str>) -> Result<Url, FetchError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::Transport(format!("invalid endpoint {}", self.endpoint)))?;
            segments
                .pop_if_empty()
                .extend(["databases", self.database_id.as_str(), "collections", collection_id, "documents"]);
            if let Some(id) = document_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        collection_id: &str,
        document_id: Option<&str>,
    ) -> Result<T, FetchError> {
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                if e.is_decode() {
                    FetchError::Malformed(e.to_string())
                } else {
                    transport_error(e)
                }
            });
        }

        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_default();
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            message
        };

        Err(match status {
            StatusCode::NOT_FOUND => FetchError::not_found(collection_id, document_id),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { retry_after_secs },
            other => FetchError::Backend {
                status: other.as_u16(),
                message,
            },
        })
    }
}

impl DocumentStore for AppwriteStore {
    #[tracing::instrument(name = "appwrite.list_documents", skip(self), fields(database = %self.database_id))]
    async fn list_documents(&self, collection_id: &str) -> Result<DocumentList, FetchError> {
        let url = self.documents_url(collection_id, None)?;
        self.fetch(url, collection_id, None).await
    }

    #[tracing::instrument(name = "appwrite.get_document", skip(self), fields(database = %self.database_id))]
    async fn get_document(&self, collection_id: &str, document_id: &str) -> Result<Document, FetchError> {
        let url = self.documents_url(collection_id, Some(document_id))?;
        self.fetch(url, collection_id, Some(document_id)).await
    }
}

/// `Origin` value the backend matches against registered platforms.
fn origin(platform: &str) -> String {
    format!("appwrite-{}://{}", std::env::consts::OS, platform)
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Transport("request timed out".to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Collections;

    fn config(endpoint: &str) -> AppwriteConfig {
        AppwriteConfig {
            endpoint: Url::parse(endpoint).unwrap(),
            project_id: "proj".to_string(),
            platform: "com.oss.jsm".to_string(),
            database_id: "db".to_string(),
            collections: Collections::default(),
            request_timeout: None,
        }
    }

    #[test]
    fn test_documents_url() {
        let store = AppwriteStore::new(&config("https://cloud.appwrite.io/v1")).unwrap();
        assert_eq!(
            store.documents_url("courses", None).unwrap().as_str(),
            "https://cloud.appwrite.io/v1/databases/db/collections/courses/documents"
        );

        let store = AppwriteStore::new(&config("https://cloud.appwrite.io/v1/")).unwrap();
        assert_eq!(
            store.documents_url("courses", Some("c 1")).unwrap().as_str(),
            "https://cloud.appwrite.io/v1/databases/db/collections/courses/documents/c%201"
        );
    }

    #[test]
    fn test_origin_carries_platform() {
        assert!(origin("com.oss.jsm").ends_with("://com.oss.jsm"));
        assert!(origin("com.oss.jsm").starts_with("appwrite-"));
    }
}
