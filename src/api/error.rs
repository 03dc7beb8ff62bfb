//! Error normalization for API calls.
//!
//! Every transport and server failure mode is collapsed into `ApiError`
//! before it leaves the client; the session and document layers only ever
//! see the display message, plus the `Auth` variant's forced-logout side
//! effect.

use thiserror::Error;

const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Errors that can occur during API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required local input is missing; rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The server rejected the credential (HTTP 401). Stored-token calls
    /// reset the session as a side effect; the message carries the
    /// server's own wording when it sent one.
    #[error("{message}")]
    Auth { message: String },

    /// No response was received (DNS, connection refused, timeout).
    #[error("Could not reach the server. Check your connection and try again.")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status and an error body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Fallback for responses the client cannot make sense of.
    #[error("Something went wrong. Please try again.")]
    Unknown,
}

impl ApiError {
    /// Build an `Auth` error from the optional error body of a 401.
    pub fn auth(detail: Option<String>) -> Self {
        ApiError::Auth {
            message: detail
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| SESSION_EXPIRED.to_string()),
        }
    }

    /// Build a `Server` error from a status code and the extracted error
    /// detail. Falls back to a generic message keyed by status code when
    /// the body carries none.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| generic_status_message(status).to_string());
        ApiError::Server { status, message }
    }

    /// Whether this error forces a session reset.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

/// Extract a human-readable message from a server error body.
///
/// The convention is a JSON object with a `detail` string. Validation
/// failures instead map field names to lists of messages; those are
/// flattened to "field: message" lines so they surface verbatim.
pub fn extract_detail(body: &serde_json::Value) -> Option<String> {
    if let Some(detail) = body.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_string());
    }

    let map = body.as_object()?;
    let mut lines = Vec::new();
    for (field, errors) in map {
        match errors {
            serde_json::Value::String(message) => lines.push(format!("{}: {}", field, message)),
            serde_json::Value::Array(messages) => {
                for message in messages {
                    if let Some(message) = message.as_str() {
                        lines.push(format!("{}: {}", field, message));
                    }
                }
            }
            _ => {}
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Generic user-facing message for a status code, used when the server
/// sends no usable error body.
fn generic_status_message(status: u16) -> &'static str {
    match status {
        400 => "The server rejected the request as invalid.",
        403 => "You do not have permission to do that.",
        404 => "The requested item was not found.",
        413 => "The file is too large to upload.",
        500..=599 => "The server encountered an error. Please try again later.",
        _ => "The request failed.",
    }
}
