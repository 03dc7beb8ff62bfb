use crate::session::intent::SessionIntent;
use crate::session::state::SessionState;
use crate::store::Reducer;

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // A new attempt supersedes whatever came before, including a
            // previous Authenticated session being re-logged.
            SessionIntent::LoginStarted => SessionState::Authenticating,
            SessionIntent::LoginSucceeded { token, user } => {
                SessionState::Authenticated { token, user }
            }
            SessionIntent::LoginFailed { message } => SessionState::Failed { error: message },
            // Explicit and forced logout end in the same place. A login
            // that is still in flight must not resurrect the session; the
            // manager checks liveness before committing its result.
            SessionIntent::LoggedOut => SessionState::Anonymous,
        }
    }
}
