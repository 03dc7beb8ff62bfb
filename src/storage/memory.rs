use std::sync::RwLock;

use super::{SecureToken, StorageError, TokenStore};

/// In-memory token storage.
///
/// Holds the token for the lifetime of the process only. Used by tests
/// and by embedders that manage persistence themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Option<SecureToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<SecureToken> {
        self.inner.read().expect("token lock poisoned").clone()
    }

    fn store(&self, token: SecureToken) -> Result<(), StorageError> {
        *self.inner.write().expect("token lock poisoned") = Some(token);
        Ok(())
    }

    fn clear(&self) -> Option<SecureToken> {
        self.inner.write().expect("token lock poisoned").take()
    }
}
