//! Mock document service for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tokio::net::TcpListener;

use askdoc::api::Document;

/// The access token the mock issues and accepts.
pub const TOKEN: &str = "tok-123";
/// Credentials the mock accepts at `/token/`.
pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "x";

/// Shared state behind the mock routes.
#[derive(Clone, Default)]
pub struct MockState {
    pub docs: Arc<Mutex<Vec<Document>>>,
    pub next_id: Arc<AtomicI64>,
    /// When set, `GET /documents/` answers 500 instead of the list.
    pub fail_list: Arc<AtomicBool>,
}

impl MockState {
    pub fn with_docs(docs: Vec<Document>) -> Self {
        let next_id = docs.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        Self {
            docs: Arc::new(Mutex::new(docs)),
            next_id: Arc::new(AtomicI64::new(next_id)),
            fail_list: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn documents(&self) -> Vec<Document> {
        self.docs.lock().unwrap().clone()
    }
}

/// Make a document record the way the mock server would.
pub fn doc(id: i64, title: &str) -> Document {
    Document {
        id,
        title: title.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn authed(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

async fn token_handler(Json(body): Json<serde_json::Value>) -> Response {
    let email = body.get("email").and_then(|v| v.as_str());
    let password = body.get("password").and_then(|v| v.as_str());
    if email == Some(EMAIL) && password == Some(PASSWORD) {
        Json(json!({"access": TOKEN})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response()
    }
}

async fn register_handler(Json(body): Json<serde_json::Value>) -> Response {
    if body.get("email").and_then(|v| v.as_str()) == Some("taken@b.com") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"email": ["user with this email already exists."]})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({"id": 2}))).into_response()
}

async fn me_handler(headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 1,
        "email": EMAIL,
        "first_name": "Ada",
        "last_name": "Lovelace"
    }))
    .into_response()
}

async fn list_handler(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    if state.fail_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Database unavailable"})),
        )
            .into_response();
    }
    Json(state.documents()).into_response()
}

async fn upload_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }

    let mut title = None;
    let mut has_file = false;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(|name| name.to_string());
        match name.as_deref() {
            Some("title") => title = Some(field.text().await.unwrap()),
            Some("file") => {
                let _ = field.bytes().await.unwrap();
                has_file = true;
            }
            _ => {}
        }
    }

    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"title": ["This field is required."]})),
        )
            .into_response();
    };
    if !has_file {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"file": ["No file was submitted."]})),
        )
            .into_response();
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let document = doc(id, &title);
    state.docs.lock().unwrap().insert(0, document.clone());
    (StatusCode::CREATED, Json(document)).into_response()
}

async fn delete_handler(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let mut docs = state.docs.lock().unwrap();
    let before = docs.len();
    docs.retain(|d| d.id != id);
    if docs.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn update_handler(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let Some(title) = body.get("title").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"title": ["This field is required."]})),
        )
            .into_response();
    };
    let mut docs = state.docs.lock().unwrap();
    match docs.iter_mut().find(|d| d.id == id) {
        Some(slot) => {
            slot.title = title.to_string();
            Json(slot.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn ask_handler(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let question = body
        .get("question")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if question.contains("unanswerable") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "AI backend unavailable"})),
        )
            .into_response();
    }
    Json(json!({"answer": "42"})).into_response()
}

/// The full document-service contract as one router.
pub fn mock_service(state: MockState) -> Router {
    Router::new()
        .route("/token/", post(token_handler))
        .route("/users/register/", post(register_handler))
        .route("/users/me/", get(me_handler))
        .route("/documents/", get(list_handler).post(upload_handler))
        .route("/documents/{id}/", put(update_handler).delete(delete_handler))
        .route("/ai/ask/", post(ask_handler))
        .with_state(state)
}

/// Bind a router on an ephemeral port and serve it in the background.
/// Returns the base URL to point an `ApiClient` at.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read mock address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{}", addr)
}
