//! Service handles injected at the composition root.
//!
//! Screens reach the backend only through [`Services`], which the mobile shell
//! builds once from [`AppConfig`] and provides as a Dioxus context.

use std::path::PathBuf;
use std::sync::Arc;

use api::{AppCatalog, AppConfig, AppwriteStore, ClerkClient, ConfigError, FileTokenCache};
use catalog::Catalog;
use dioxus::prelude::*;

#[derive(Clone, Debug)]
pub struct Services {
    pub catalog: AppCatalog,
    pub identity: ClerkClient,
}

impl Services {
    pub fn new(catalog: AppCatalog, identity: ClerkClient) -> Self {
        Self { catalog, identity }
    }

    /// Build the database and identity clients. The client token is kept under
    /// the platform data directory.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let store = AppwriteStore::new(&config.appwrite)?;
        let catalog = Catalog::new(store, config.appwrite.collections.clone());
        let tokens = Arc::new(FileTokenCache::new(token_cache_path()));
        let identity = ClerkClient::new(&config.identity, tokens)?;
        Ok(Self::new(catalog, identity))
    }
}

/// `<data_dir>/learnhub/client-token`
pub fn token_cache_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("learnhub")
        .join("client-token")
}

pub fn use_services() -> Services {
    use_context::<Services>()
}
