//! Client-side view of the user's authentication state.
//!
//! ```text
//! SignedOut ──sign_up──▶ PendingVerification ──verified──▶ SignedIn
//!     │                        │                              │
//!     └──────sign_in───────────┼─────────────────────────────▶│
//!     ▲                        │                              │
//!     └──────── abandon ───────┘◀──────── sign_out ───────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    SignedOut,
    /// A sign-up was created and an email code was sent.
    PendingVerification { sign_up_id: String, email: String },
    SignedIn { session_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while {from}")]
pub struct TransitionError {
    pub from: &'static str,
    pub action: &'static str,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::SignedOut => "signed out",
            SessionState::PendingVerification { .. } => "pending verification",
            SessionState::SignedIn { .. } => "signed in",
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            SessionState::SignedIn { session_id } => Some(session_id),
            _ => None,
        }
    }

    pub fn pending_sign_up(&self) -> Option<&str> {
        match self {
            SessionState::PendingVerification { sign_up_id, .. } => Some(sign_up_id),
            _ => None,
        }
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError {
            from: self.name(),
            action,
        }
    }

    /// `SignedOut -> PendingVerification`
    pub fn await_verification(
        &self,
        sign_up_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<SessionState, TransitionError> {
        match self {
            SessionState::SignedOut => Ok(SessionState::PendingVerification {
                sign_up_id: sign_up_id.into(),
                email: email.into(),
            }),
            _ => Err(self.reject("start verification")),
        }
    }

    /// `PendingVerification -> SignedIn`
    pub fn verified(&self, session_id: impl Into<String>) -> Result<SessionState, TransitionError> {
        match self {
            SessionState::PendingVerification { .. } => Ok(SessionState::SignedIn {
                session_id: session_id.into(),
            }),
            _ => Err(self.reject("complete verification")),
        }
    }

    /// `SignedOut -> SignedIn`
    pub fn signed_in(&self, session_id: impl Into<String>) -> Result<SessionState, TransitionError> {
        match self {
            SessionState::SignedOut => Ok(SessionState::SignedIn {
                session_id: session_id.into(),
            }),
            _ => Err(self.reject("sign in")),
        }
    }

    /// `SignedIn -> SignedOut`
    pub fn signed_out(&self) -> Result<SessionState, TransitionError> {
        match self {
            SessionState::SignedIn { .. } => Ok(SessionState::SignedOut),
            _ => Err(self.reject("sign out")),
        }
    }

    /// `PendingVerification -> SignedOut`
    pub fn abandon_verification(&self) -> Result<SessionState, TransitionError> {
        match self {
            SessionState::PendingVerification { .. } => Ok(SessionState::SignedOut),
            _ => Err(self.reject("abandon verification")),
        }
    }
}
