//! HTTP API client: transport, wire types, and error normalization.

mod client;
mod error;
mod types;

pub use client::{ApiClient, ForcedLogoutListener};
pub use error::{extract_detail, ApiError};
pub use types::{
    AskRequest, AskResponse, Credentials, Document, RegisterRequest, TokenResponse,
    UpdateDocumentRequest, UploadFile, UserRecord,
};
