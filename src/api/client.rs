//! HTTP transport for the document service.
//!
//! Single point of egress: URL building, timeouts, bearer-token
//! injection, error normalization, and the 401 forced-logout cascade all
//! live here. No business logic.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::storage::{SecureToken, TokenStore};

use super::error::{extract_detail, ApiError};
use super::types::{
    AskRequest, AskResponse, Credentials, Document, RegisterRequest, TokenResponse,
    UpdateDocumentRequest, UploadFile, UserRecord,
};

/// Callback invoked when a 401 invalidates the stored credential.
///
/// Injectable so the transport never reaches into the view layer
/// directly; the session manager subscribes its own reset, and a frontend
/// can subscribe its navigation-to-login.
pub type ForcedLogoutListener = Arc<dyn Fn() + Send + Sync>;

/// Per-call dispatch flags.
#[derive(Debug, Clone, Copy, Default)]
struct CallOptions {
    /// Uploads get the longer timeout.
    upload: bool,
    /// A call flagged as a retry attempt never triggers a second
    /// forced-logout cascade.
    retry: bool,
}

/// HTTP client for the document service.
///
/// Cheap to clone; all clones share the same connection pool, token
/// store, and listener set.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    upload_timeout: Duration,
    tokens: Arc<dyn TokenStore>,
    logout_listeners: RwLock<Vec<ForcedLogoutListener>>,
}

impl ApiClient {
    /// Build a client from endpoint configuration and a token store.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                request_timeout: Duration::from_secs(config.timeout_seconds.into()),
                upload_timeout: Duration::from_secs(config.upload_timeout_seconds.into()),
                tokens,
                logout_listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Register a listener for forced logouts.
    pub fn on_forced_logout(&self, listener: ForcedLogoutListener) {
        self.inner
            .logout_listeners
            .write()
            .expect("listener lock poisoned")
            .push(listener);
    }

    /// The token store shared with the session layer.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.inner.tokens)
    }

    // -- Endpoints ----------------------------------------------------------

    /// POST `/token/`: exchange credentials for an access token.
    pub async fn exchange_token(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SecureToken, ApiError> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self.request(Method::POST, "/token/").json(&body);
        let response = self
            .execute("/token/", builder, CallOptions::default())
            .await?;
        let token: TokenResponse = parse_json(response).await?;
        Ok(SecureToken::new(token.access))
    }

    /// POST `/users/register/`: create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/users/register/").json(request);
        self.execute("/users/register/", builder, CallOptions::default())
            .await?;
        Ok(())
    }

    /// GET `/users/me/`: fetch the authenticated user's profile.
    pub async fn current_user(&self) -> Result<UserRecord, ApiError> {
        let builder = self.request(Method::GET, "/users/me/");
        let response = self
            .execute("/users/me/", builder, CallOptions::default())
            .await?;
        parse_json(response).await
    }

    /// GET `/documents/`: list the user's documents, server order.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let builder = self.request(Method::GET, "/documents/");
        let response = self
            .execute("/documents/", builder, CallOptions::default())
            .await?;
        parse_json(response).await
    }

    /// POST `/documents/`: upload a file as a new document. The server
    /// assigns the id and timestamp.
    pub async fn upload_document(
        &self,
        file: &UploadFile,
        title: &str,
    ) -> Result<Document, ApiError> {
        let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        let form = multipart::Form::new()
            .text("title", title.to_string())
            .part("file", part);
        let builder = self.request(Method::POST, "/documents/").multipart(form);
        let options = CallOptions {
            upload: true,
            ..CallOptions::default()
        };
        let response = self.execute("/documents/", builder, options).await?;
        parse_json(response).await
    }

    /// DELETE `/documents/{id}/`.
    pub async fn delete_document(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/documents/{}/", id);
        let builder = self.request(Method::DELETE, &path);
        self.execute(&path, builder, CallOptions::default()).await?;
        Ok(())
    }

    /// PUT `/documents/{id}/`: update document metadata.
    pub async fn update_document(&self, id: i64, title: &str) -> Result<Document, ApiError> {
        let path = format!("/documents/{}/", id);
        let body = UpdateDocumentRequest {
            title: title.to_string(),
        };
        let builder = self.request(Method::PUT, &path).json(&body);
        let response = self.execute(&path, builder, CallOptions::default()).await?;
        parse_json(response).await
    }

    /// POST `/ai/ask/`: ask a question against a document.
    pub async fn ask_question(&self, document_id: i64, question: &str) -> Result<String, ApiError> {
        let body = AskRequest {
            document_id,
            question: question.to_string(),
        };
        let builder = self.request(Method::POST, "/ai/ask/").json(&body);
        let response = self
            .execute("/ai/ask/", builder, CallOptions::default())
            .await?;
        let answer: AskResponse = parse_json(response).await?;
        Ok(answer.answer)
    }

    // -- Transport ----------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        self.inner.http.request(method, url)
    }

    /// Dispatch one request: apply the timeout, attach the stored token,
    /// and normalize every failure mode into `ApiError`.
    async fn execute(
        &self,
        path: &str,
        builder: RequestBuilder,
        options: CallOptions,
    ) -> Result<Response, ApiError> {
        let request_id = Uuid::new_v4();
        let timeout = if options.upload {
            self.inner.upload_timeout
        } else {
            self.inner.request_timeout
        };

        let mut builder = builder.timeout(timeout);
        if let Some(token) = self.inner.tokens.load() {
            builder = builder.bearer_auth(token.expose());
        }

        debug!(%request_id, path, "dispatching request");

        let response = builder.send().await.map_err(|e| {
            warn!(%request_id, path, error = %e, "transport failure");
            ApiError::Network { source: e }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let detail = read_detail(response).await;
            if !options.retry {
                self.force_logout();
            }
            return Err(ApiError::auth(detail));
        }

        if !status.is_success() {
            let detail = read_detail(response).await;
            warn!(%request_id, path, status = status.as_u16(), "server error");
            return Err(ApiError::from_status(status.as_u16(), detail));
        }

        debug!(%request_id, path, status = status.as_u16(), "request complete");
        Ok(response)
    }

    /// Invalidate the session after a rejected credential.
    ///
    /// Listeners fire only for the call that actually removed the token,
    /// so overlapping 401s collapse into a single forced logout.
    fn force_logout(&self) {
        if self.inner.tokens.clear().is_some() {
            warn!("credential rejected by server; forcing logout");
            let listeners = self
                .inner
                .logout_listeners
                .read()
                .expect("listener lock poisoned");
            for listener in listeners.iter() {
                listener();
            }
        }
    }
}

async fn read_detail(response: Response) -> Option<String> {
    let body: serde_json::Value = response.json().await.ok()?;
    extract_detail(&body)
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| {
        warn!(error = %e, "unparseable response body");
        ApiError::Unknown
    })
}
