//! Configuration loading and validation.
//!
//! The config file lives under the platform config directory and only
//! carries endpoint settings; everything has a working default so a
//! missing file is not an error.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV_VAR};
pub use types::{ApiConfig, Config};
