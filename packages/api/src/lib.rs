//! # API crate: external service clients for the learning app
//!
//! Everything that talks to the network lives here. Screens never build HTTP
//! requests themselves: they receive an [`AppwriteStore`] (wrapped in a
//! [`catalog::Catalog`]) and a [`ClerkClient`] from the composition root.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Environment-driven settings; a missing publishable key is fatal |
//! | [`appwrite`] | Document database adapter implementing [`catalog::DocumentStore`] |
//! | [`identity`] | Identity provider trait, the Clerk Frontend API client and client-token caches |
//! | [`session`] | Explicit signed-out / pending-verification / signed-in state |
//! | [`auth`] | Sign-in, sign-up, email verification, sign-out and account deletion flows |
//!
//! ## Errors
//!
//! Data reads fail with [`catalog::FetchError`], identity calls with
//! [`IdentityError`], and flows with [`AuthError`], whose
//! [`user_message`](AuthError::user_message) is what the screens display.

pub mod appwrite;
pub mod auth;
pub mod config;
pub mod identity;
pub mod session;

pub use appwrite::AppwriteStore;
pub use auth::AuthError;
pub use config::{AppConfig, AppwriteConfig, ConfigError, IdentityConfig};
pub use identity::{
    ActiveSession, ClerkClient, FileTokenCache, IdentityError, IdentityProvider,
    MemoryTokenCache, ProfileImage, SignUpParams, TokenCache, UserProfile,
};
pub use session::{SessionState, TransitionError};

/// Catalog bound to the hosted document database.
pub type AppCatalog = catalog::Catalog<AppwriteStore>;
