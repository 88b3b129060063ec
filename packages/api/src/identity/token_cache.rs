//! Storage for the identity provider's per-device client token.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

pub trait TokenCache: Send + Sync {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenCache {
    token: Mutex<Option<String>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenCache for MemoryTokenCache {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Persists the token in a single file so the user stays signed in across launches.
#[derive(Debug, Clone)]
pub struct FileTokenCache {
    path: PathBuf,
}

impl FileTokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenCache for FileTokenCache {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create token cache directory: {}", e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!("Failed to save client token: {}", e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to clear client token: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("nested").join("client.jwt"));

        assert_eq!(cache.load(), None);
        cache.store("jwt-1");
        assert_eq!(cache.load().as_deref(), Some("jwt-1"));
        cache.store("jwt-2");
        assert_eq!(cache.load().as_deref(), Some("jwt-2"));
        cache.clear();
        assert_eq!(cache.load(), None);
        // clearing twice is fine
        cache.clear();
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemoryTokenCache::new();
        cache.store("abc");
        assert_eq!(cache.load().as_deref(), Some("abc"));
        cache.clear();
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_memory_cache_after_poisoned_lock() {
        let cache = MemoryTokenCache::new();
        cache.store("abc");
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = cache.token.lock().unwrap();
            panic!("panicked while holding the token lock");
        }));

        assert_eq!(cache.load().as_deref(), Some("abc"));
        cache.clear();
        assert!(cache.load().is_none());
    }
}
