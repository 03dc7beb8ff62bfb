use std::fs;
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use super::{SecureToken, StorageError, TokenStore};

/// File-backed token storage.
///
/// Writes the token to a single well-known file under the platform data
/// directory so it survives process restarts. Writes take an exclusive
/// advisory lock; overlapping invocations serialize on it instead of
/// interleaving partial writes.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Returns the default token file path.
    ///
    /// Uses `~/.local/share/askdoc/token` on Linux, or equivalent via
    /// `dirs::data_dir()`. Falls back to the current directory if the
    /// data dir is unavailable.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("askdoc").join("token")
    }

    /// Create a store over the default token file.
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    /// Create a store over an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<SecureToken> {
        let content = fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        if token.is_empty() {
            return None;
        }
        Some(SecureToken::new(token.to_string()))
    }

    fn store(&self, token: SecureToken) -> Result<(), StorageError> {
        let wrap = |source| StorageError::WriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }

        let mut file = fs::File::create(&self.path).map_err(wrap)?;
        file.lock_exclusive().map_err(wrap)?;
        let result = file
            .write_all(token.expose().as_bytes())
            .and_then(|_| file.flush());
        let _ = FileExt::unlock(&file);
        result.map_err(wrap)
    }

    fn clear(&self) -> Option<SecureToken> {
        let token = self.load();
        if token.is_some() {
            let _ = fs::remove_file(&self.path);
        }
        token
    }
}
