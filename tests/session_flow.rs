mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use askdoc::api::ApiError;
use askdoc::session::{SessionManager, SessionState};
use askdoc::storage::SecureToken;

use common::client_with_token;
use common::mock_backend::{mock_service, serve, MockState, EMAIL, PASSWORD, TOKEN};
use common::unreachable_base_url;

#[tokio::test]
async fn login_stores_token_and_fetches_profile() {
    let base_url = serve(mock_service(MockState::default())).await;
    let (client, tokens) = client_with_token(&base_url, None);
    let session = SessionManager::new(client);

    session.login(EMAIL, PASSWORD).await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.state().user().unwrap().email, EMAIL);
    assert_eq!(tokens.load().unwrap().expose(), TOKEN);
}

#[tokio::test]
async fn login_with_bad_credentials_surfaces_server_message() {
    let base_url = serve(mock_service(MockState::default())).await;
    let (client, tokens) = client_with_token(&base_url, None);
    let session = SessionManager::new(client);

    let err = session.login(EMAIL, "wrong").await.unwrap_err();
    assert!(err.is_auth());

    let state = session.state();
    assert!(!state.is_authenticated());
    assert_eq!(
        state.error(),
        Some("No active account found with the given credentials")
    );
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn login_with_empty_credentials_never_touches_the_network() {
    // Nothing listens at this URL; a validation failure is only
    // distinguishable from a connection failure if no call was issued.
    let (client, tokens) = client_with_token(&unreachable_base_url(), None);
    let session = SessionManager::new(client);

    let err = session.login("", "").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(!session.is_authenticated());
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn failed_profile_fetch_discards_the_token() {
    // Token exchange succeeds, but the profile endpoint is broken; the
    // session must not be left with a token and no user.
    let router = Router::new()
        .route(
            "/token/",
            post(|| async { Json(json!({"access": "tok-123"})) }),
        )
        .route(
            "/users/me/",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Profile lookup failed"})),
                )
            }),
        );
    let base_url = serve(router).await;
    let (client, tokens) = client_with_token(&base_url, None);
    let session = SessionManager::new(client);

    let err = session.login(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err.to_string(), "Profile lookup failed");

    let state = session.state();
    assert!(!state.is_authenticated());
    assert_eq!(state.error(), Some("Profile lookup failed"));
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn logout_is_local_and_complete() {
    let base_url = serve(mock_service(MockState::default())).await;
    let (client, tokens) = client_with_token(&base_url, None);
    let session = SessionManager::new(client);

    session.login(EMAIL, PASSWORD).await.unwrap();
    session.logout();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn rejected_credential_forces_the_session_back_to_anonymous() {
    let base_url = serve(mock_service(MockState::default())).await;
    let (client, tokens) = client_with_token(&base_url, None);
    let session = SessionManager::new(client.clone());

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    client.on_forced_logout(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    session.login(EMAIL, PASSWORD).await.unwrap();

    // The server stops accepting the credential (expired token).
    tokens
        .store(SecureToken::new("expired-token".to_string()))
        .unwrap();

    let err = client.list_documents().await.unwrap_err();
    assert!(err.is_auth());

    // Transport-layer detection, same end state as an explicit logout.
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(tokens.load().is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Subsequent calls carry no token: the server rejects them, but with
    // nothing left to clear the cascade does not fire again.
    let err = client.current_user().await.unwrap_err();
    assert!(err.is_auth());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Re-login restores the session.
    session.login(EMAIL, PASSWORD).await.unwrap();
    assert!(session.is_authenticated());
}
