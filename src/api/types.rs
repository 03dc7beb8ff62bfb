//! Wire types for the document service API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials submitted to `POST /token/`.
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response of `POST /token/`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// The access token. No refresh token is consumed even if the server
    /// issues one.
    pub access: String,
}

/// Fields submitted to `POST /users/register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The authenticated user, as returned by `GET /users/me/`.
///
/// Opaque beyond display use; replaced wholesale on each login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A document record. The server is authoritative for every field; the
/// client never edits one locally, only replaces whole records from
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A file selected for upload, held in memory until the multipart call.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Body of `PUT /documents/{id}/`.
#[derive(Debug, Serialize)]
pub struct UpdateDocumentRequest {
    pub title: String,
}

/// Body of `POST /ai/ask/`.
#[derive(Debug, Serialize)]
pub struct AskRequest {
    pub document_id: i64,
    pub question: String,
}

/// Response of `POST /ai/ask/`.
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
