//! Failure kinds for document-database calls.
//!
//! Every list/get call in [`crate::Catalog`] returns `Result<_, FetchError>`, so a
//! screen can tell "the collection is empty" (`Ok(vec![])`) apart from "the fetch
//! failed" and react per kind: offer a retry for transport errors, show a
//! "not found" page for [`FetchError::NotFound`], ignore [`FetchError::Cancelled`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network unreachable, connection reset, timeout.
    #[error("network error: {0}")]
    Transport(String),

    /// The collection or the document does not exist (or no collection id is configured).
    #[error("not found: {}", not_found_target(.collection, .document_id.as_deref()))]
    NotFound {
        collection: String,
        document_id: Option<String>,
    },

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The backend answered but the payload could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Any other non-success status.
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// The caller dropped interest before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

fn not_found_target(collection: &str, document_id: Option<&str>) -> String {
    let collection = if collection.is_empty() {
        "<unconfigured collection>"
    } else {
        collection
    };
    match document_id {
        Some(id) => format!("{collection}/{id}"),
        None => collection.to_string(),
    }
}

impl FetchError {
    pub fn not_found(collection: &str, document_id: Option<&str>) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            document_id: document_id.map(str::to_string),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether trying the same call again could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited { .. } => true,
            Self::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(FetchError::RateLimited { retry_after_secs: None }.is_retryable());
        assert!(FetchError::Backend { status: 503, message: String::new() }.is_retryable());
        assert!(!FetchError::Backend { status: 400, message: String::new() }.is_retryable());
        assert!(!FetchError::not_found("courses", Some("x")).is_retryable());
        assert!(!FetchError::Unauthorized("guest".into()).is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            FetchError::not_found("courses", Some("abc")).to_string(),
            "not found: courses/abc"
        );
        assert_eq!(
            FetchError::not_found("", None).to_string(),
            "not found: <unconfigured collection>"
        );
    }
}
