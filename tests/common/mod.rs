//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::sync::Arc;

use askdoc::api::ApiClient;
use askdoc::config::ApiConfig;
use askdoc::storage::{MemoryTokenStore, SecureToken, TokenStore};

/// Build an `ApiClient` over an in-memory token store, optionally
/// pre-seeded with a token.
pub fn client_with_token(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<dyn TokenStore>) {
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    if let Some(token) = token {
        tokens
            .store(SecureToken::new(token.to_string()))
            .expect("Failed to seed token");
    }

    let config = ApiConfig {
        base_url: base_url.to_string(),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, Arc::clone(&tokens));
    (client, tokens)
}

/// Base URL that refuses every connection, for transport-failure tests.
pub fn unreachable_base_url() -> String {
    // Bind a port, then drop the listener so nothing answers there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", addr)
}
