//! Access-token persistence.
//!
//! The session layer and the API client share one `TokenStore`. The file
//! implementation keeps the token across process restarts; the in-memory
//! implementation exists so both layers can be tested without touching
//! the filesystem.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Errors that can occur when persisting the access token.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write token file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Wrapper for the access token that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when attaching it to a
/// request.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureToken(String);

impl SecureToken {
    /// Create a new secure token.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to the API.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureToken(••••••••)")
    }
}

impl std::fmt::Display for SecureToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Durable storage for the access token.
///
/// Single well-known slot: one token at a time, replaced wholesale on
/// login and removed on logout. `clear()` returns the removed token so
/// callers can tell whether they were the ones that actually ended the
/// session (the forced-logout cascade relies on this).
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Option<SecureToken>;

    /// Replace the stored token.
    fn store(&self, token: SecureToken) -> Result<(), StorageError>;

    /// Remove the stored token, returning it if one was present.
    fn clear(&self) -> Option<SecureToken>;
}
