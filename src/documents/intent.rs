use crate::api::Document;
use crate::store::Intent;

/// Document-store transitions.
///
/// Terminal intents echo the `generation` their operation was started
/// under. The reducer compares it against the current generation to
/// decide whether the result is still current; collection edits that
/// commute (insert, remove, replace by id) are applied either way.
pub enum DocumentsIntent {
    FetchStarted,
    FetchSucceeded {
        generation: u64,
        documents: Vec<Document>,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },
    UploadStarted,
    UploadSucceeded {
        generation: u64,
        document: Document,
    },
    UploadFailed {
        generation: u64,
        message: String,
    },
    RemoveStarted,
    RemoveSucceeded {
        generation: u64,
        id: i64,
    },
    RemoveFailed {
        generation: u64,
        message: String,
    },
    UpdateStarted,
    UpdateSucceeded {
        generation: u64,
        document: Document,
    },
    UpdateFailed {
        generation: u64,
        message: String,
    },
    Selected {
        id: i64,
    },
    SelectionCleared,
}

impl Intent for DocumentsIntent {}
