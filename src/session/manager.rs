use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::api::{ApiClient, ApiError, RegisterRequest};
use crate::session::intent::SessionIntent;
use crate::session::reducer::SessionReducer;
use crate::session::state::SessionState;
use crate::store::Reducer;

/// Owns the session state and drives its transitions.
///
/// All mutation goes through `SessionReducer`; the async operations here
/// only decide which intents to apply around the API calls. Cheap to
/// clone; clones share state.
#[derive(Clone)]
pub struct SessionManager {
    state: Arc<RwLock<SessionState>>,
    client: ApiClient,
}

impl SessionManager {
    /// Create a manager over the given client and wire its reset into
    /// the client's forced-logout event.
    pub fn new(client: ApiClient) -> Self {
        let state = Arc::new(RwLock::new(SessionState::default()));

        let listener_state = Arc::clone(&state);
        client.on_forced_logout(Arc::new(move || {
            let mut guard = listener_state.write().expect("session state lock poisoned");
            *guard = SessionReducer::reduce(guard.clone(), SessionIntent::LoggedOut);
        }));

        Self { state, client }
    }

    /// Get a clone of the current session state.
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .expect("session state lock poisoned")
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    fn apply(&self, intent: SessionIntent) {
        let mut guard = self.state.write().expect("session state lock poisoned");
        *guard = SessionReducer::reduce(guard.clone(), intent);
    }

    /// Exchange credentials for a token, persist it, then fetch the
    /// profile. Only when both succeed does the session become
    /// authenticated; a failure after the token exchange discards the
    /// token again, so the session is never left half-built.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            let err = ApiError::Validation("Email and password are required.".to_string());
            self.apply(SessionIntent::LoginFailed {
                message: err.to_string(),
            });
            return Err(err);
        }

        self.apply(SessionIntent::LoginStarted);

        let token = match self.client.exchange_token(email, password).await {
            Ok(token) => token,
            Err(err) => return Err(self.fail_login(err)),
        };

        if let Err(err) = self.client.token_store().store(token.clone()) {
            let err = ApiError::Validation(err.to_string());
            return Err(self.fail_login(err));
        }

        // The profile fetch runs with the freshly persisted token. If it
        // fails, the token is discarded and the whole login reports as
        // failed; token-without-user is not a state this session can be in.
        let user = match self.client.current_user().await {
            Ok(user) => user,
            Err(err) => {
                self.client.token_store().clear();
                return Err(self.fail_login(err));
            }
        };

        // Commit only if nothing ended the attempt while the profile
        // fetch was in flight (e.g. an explicit logout).
        let mut guard = self.state.write().expect("session state lock poisoned");
        if matches!(*guard, SessionState::Authenticating) {
            info!(user = %user.email, "login complete");
            *guard = SessionReducer::reduce(
                guard.clone(),
                SessionIntent::LoginSucceeded { token, user },
            );
        } else {
            debug!("login result discarded; session was reset mid-flight");
            // A competing login may have won in the meantime; only an
            // unauthenticated session gets its leftover token dropped.
            if !guard.is_authenticated() {
                self.client.token_store().clear();
            }
        }
        Ok(())
    }

    /// Create an account. Does not authenticate; callers follow up with
    /// `login`. Backend validation errors surface verbatim.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.client.register(request).await
    }

    /// Local-only reset: clears the stored token and returns the session
    /// to anonymous. No network call.
    pub fn logout(&self) {
        self.client.token_store().clear();
        self.apply(SessionIntent::LoggedOut);
        info!("logged out");
    }

    fn fail_login(&self, err: ApiError) -> ApiError {
        self.apply(SessionIntent::LoginFailed {
            message: err.to_string(),
        });
        err
    }
}
