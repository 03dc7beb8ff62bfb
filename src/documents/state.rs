use crate::api::Document;
use crate::store::StoreState;

/// The document collection plus its shared request status.
///
/// Loading and error are per-collection, not per-document: a single
/// in-flight operation's status is visible globally until the next
/// transition. `generation` counts start-transitions; terminal intents
/// carry the generation they were started under so a late-arriving
/// response can never overwrite state from a newer operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentsState {
    /// Most-recently-uploaded first for new uploads, otherwise server
    /// order. Document ids are unique within the collection.
    pub documents: Vec<Document>,
    pub loading: bool,
    pub error: Option<String>,
    /// Id of the document currently selected for Q&A, if any.
    pub selected: Option<i64>,
    /// Bumped by every start-transition.
    pub generation: u64,
}

impl StoreState for DocumentsState {}

impl DocumentsState {
    pub fn contains(&self, id: i64) -> bool {
        self.documents.iter().any(|doc| doc.id == id)
    }

    pub fn selected_document(&self) -> Option<&Document> {
        let id = self.selected?;
        self.documents.iter().find(|doc| doc.id == id)
    }
}
