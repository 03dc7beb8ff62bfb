use crate::documents::intent::DocumentsIntent;
use crate::documents::state::DocumentsState;
use crate::store::Reducer;

pub struct DocumentsReducer;

impl DocumentsReducer {
    /// Start-transition: bump the generation, mark in-flight, clear the
    /// previous error.
    fn start(mut state: DocumentsState) -> DocumentsState {
        state.generation += 1;
        state.loading = true;
        state.error = None;
        state
    }

    /// Clear the in-flight flags, but only if no newer operation has
    /// started since; a stale result must not flip a newer operation's
    /// loading state.
    fn settle(mut state: DocumentsState, generation: u64, error: Option<String>) -> DocumentsState {
        if generation == state.generation {
            state.loading = false;
            state.error = error;
        }
        state
    }
}

impl Reducer for DocumentsReducer {
    type State = DocumentsState;
    type Intent = DocumentsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DocumentsIntent::FetchStarted
            | DocumentsIntent::UploadStarted
            | DocumentsIntent::RemoveStarted
            | DocumentsIntent::UpdateStarted => Self::start(state),

            DocumentsIntent::FetchSucceeded {
                generation,
                documents,
            } => {
                // Wholesale replacement only commits while current: a
                // late response for an older fetch would otherwise
                // resurrect entries a newer operation already dropped.
                if generation != state.generation {
                    return state;
                }
                let mut state = Self::settle(state, generation, None);
                state.documents = documents;
                if let Some(id) = state.selected {
                    if !state.contains(id) {
                        state.selected = None;
                    }
                }
                state
            }

            DocumentsIntent::UploadSucceeded {
                generation,
                document,
            } => {
                let mut state = Self::settle(state, generation, None);
                // The server-assigned record goes in front. A concurrent
                // fetch may already have delivered it; ids stay unique.
                if !state.contains(document.id) {
                    state.documents.insert(0, document);
                }
                state
            }

            DocumentsIntent::RemoveSucceeded { generation, id } => {
                let mut state = Self::settle(state, generation, None);
                // Confirmed by the server, so the entry goes regardless
                // of how stale the response is.
                state.documents.retain(|doc| doc.id != id);
                if state.selected == Some(id) {
                    state.selected = None;
                }
                state
            }

            DocumentsIntent::UpdateSucceeded {
                generation,
                document,
            } => {
                let mut state = Self::settle(state, generation, None);
                if let Some(slot) = state.documents.iter_mut().find(|doc| doc.id == document.id) {
                    *slot = document;
                }
                state
            }

            DocumentsIntent::FetchFailed {
                generation,
                message,
            }
            | DocumentsIntent::UploadFailed {
                generation,
                message,
            }
            | DocumentsIntent::RemoveFailed {
                generation,
                message,
            }
            | DocumentsIntent::UpdateFailed {
                generation,
                message,
            } => {
                // Failures leave the collection untouched.
                Self::settle(state, generation, Some(message))
            }

            DocumentsIntent::Selected { id } => {
                let mut state = state;
                if state.contains(id) {
                    state.selected = Some(id);
                }
                state
            }

            DocumentsIntent::SelectionCleared => {
                let mut state = state;
                state.selected = None;
                state
            }
        }
    }
}
