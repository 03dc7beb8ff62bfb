//! Per-question interaction against a selected document.
//!
//! Stateless by design: nothing here touches the document store, no
//! retry, no caching of prior answers. `QaExchange` is the dialog-scoped
//! record of one interaction and is dropped when the dialog closes.

use crate::api::ApiClient;

/// One question/answer interaction.
///
/// Created when a question is submitted, discarded when the dialog
/// closes. A discarded exchange ignores late-arriving results, so an
/// answer can never surface on a dialog the user already left.
#[derive(Debug, Clone, PartialEq)]
pub struct QaExchange {
    pub document_id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub error: Option<String>,
    discarded: bool,
}

impl QaExchange {
    pub fn new(document_id: i64, question: impl Into<String>) -> Self {
        Self {
            document_id,
            question: question.into(),
            answer: None,
            error: None,
            discarded: false,
        }
    }

    /// Commit the outcome of the network call, unless the exchange was
    /// discarded while the call was in flight.
    pub fn resolve(&mut self, result: Result<String, String>) {
        if self.discarded {
            return;
        }
        match result {
            Ok(answer) => {
                self.answer = Some(answer);
                self.error = None;
            }
            Err(message) => {
                self.answer = None;
                self.error = Some(message);
            }
        }
    }

    /// Close the interaction; any in-flight result is dropped.
    pub fn discard(&mut self) {
        self.discarded = true;
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }
}

/// Ask a question against a document.
///
/// Failures come back as a displayable message, never as a panic or a
/// raw transport error; this is the whole error contract of the Q&A
/// surface.
pub async fn ask(client: &ApiClient, document_id: i64, question: &str) -> Result<String, String> {
    if question.trim().is_empty() {
        return Err("Type a question first.".to_string());
    }
    client
        .ask_question(document_id, question)
        .await
        .map_err(|err| err.to_string())
}
