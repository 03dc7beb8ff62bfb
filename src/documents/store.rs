use std::sync::{Arc, RwLock};

use tracing::info;

use crate::api::{ApiClient, ApiError, Document, UploadFile};
use crate::documents::intent::DocumentsIntent;
use crate::documents::reducer::DocumentsReducer;
use crate::documents::state::DocumentsState;
use crate::store::Reducer;

/// Owns the document collection and drives its transitions.
///
/// Single writer by contract: nothing outside this store mutates the
/// collection. Reads hand out clones. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct DocumentStore {
    state: Arc<RwLock<DocumentsState>>,
    client: ApiClient,
}

impl DocumentStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: Arc::new(RwLock::new(DocumentsState::default())),
            client,
        }
    }

    /// Get a clone of the current state.
    pub fn state(&self) -> DocumentsState {
        self.state
            .read()
            .expect("documents state lock poisoned")
            .clone()
    }

    fn apply(&self, intent: DocumentsIntent) -> DocumentsState {
        let mut guard = self.state.write().expect("documents state lock poisoned");
        *guard = DocumentsReducer::reduce(guard.clone(), intent);
        guard.clone()
    }

    /// Apply a start-transition and return the generation the operation
    /// runs under.
    fn begin(&self, intent: DocumentsIntent) -> u64 {
        self.apply(intent).generation
    }

    /// Replace the collection with the server's list. On failure the
    /// previous collection stays untouched.
    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        let generation = self.begin(DocumentsIntent::FetchStarted);
        match self.client.list_documents().await {
            Ok(documents) => {
                self.apply(DocumentsIntent::FetchSucceeded {
                    generation,
                    documents,
                });
                Ok(())
            }
            Err(err) => {
                self.apply(DocumentsIntent::FetchFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Upload a file as a new document. Both a file and a non-empty
    /// title are required; anything missing is rejected locally before a
    /// network call is issued, leaving the state untouched.
    pub async fn upload(
        &self,
        file: Option<&UploadFile>,
        title: &str,
    ) -> Result<Document, ApiError> {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("A document title is required.".to_string()));
        }
        let file = file
            .ok_or_else(|| ApiError::Validation("Choose a file to upload.".to_string()))?;

        let generation = self.begin(DocumentsIntent::UploadStarted);
        match self.client.upload_document(file, title).await {
            Ok(document) => {
                info!(id = document.id, title = %document.title, "document uploaded");
                self.apply(DocumentsIntent::UploadSucceeded {
                    generation,
                    document: document.clone(),
                });
                Ok(document)
            }
            Err(err) => {
                self.apply(DocumentsIntent::UploadFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Delete a document. The entry leaves the collection only after the
    /// server confirms; a failed delete leaves it visible.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        let generation = self.begin(DocumentsIntent::RemoveStarted);
        match self.client.delete_document(id).await {
            Ok(()) => {
                info!(id, "document deleted");
                self.apply(DocumentsIntent::RemoveSucceeded { generation, id });
                Ok(())
            }
            Err(err) => {
                self.apply(DocumentsIntent::RemoveFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Rename a document; the server's response replaces the local
    /// record wholesale.
    pub async fn update_title(&self, id: i64, title: &str) -> Result<Document, ApiError> {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("A document title is required.".to_string()));
        }

        let generation = self.begin(DocumentsIntent::UpdateStarted);
        match self.client.update_document(id, title).await {
            Ok(document) => {
                self.apply(DocumentsIntent::UpdateSucceeded {
                    generation,
                    document: document.clone(),
                });
                Ok(document)
            }
            Err(err) => {
                self.apply(DocumentsIntent::UpdateFailed {
                    generation,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Mark a document as the Q&A target. Unknown ids are ignored.
    pub fn select(&self, id: i64) {
        self.apply(DocumentsIntent::Selected { id });
    }

    pub fn clear_selection(&self) {
        self.apply(DocumentsIntent::SelectionCleared);
    }
}
