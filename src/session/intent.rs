use crate::api::UserRecord;
use crate::storage::SecureToken;
use crate::store::Intent;

/// Session transitions.
pub enum SessionIntent {
    /// Credentials submitted; clears any previous error.
    LoginStarted,
    /// Token exchanged and profile fetched.
    LoginSucceeded {
        token: SecureToken,
        user: UserRecord,
    },
    /// Token exchange, persistence, or profile fetch failed.
    LoginFailed { message: String },
    /// Explicit logout or forced logout; both end in the same place.
    LoggedOut,
}

impl Intent for SessionIntent {}
