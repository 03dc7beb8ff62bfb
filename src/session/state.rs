use crate::api::UserRecord;
use crate::storage::SecureToken;
use crate::store::StoreState;

/// Authentication state machine.
///
/// `Authenticated` holds both the token and the user record, so a
/// half-authenticated session (token without profile, or vice versa) is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No credential.
    #[default]
    Anonymous,
    /// A login attempt failed; message shown until the next attempt.
    Failed { error: String },
    /// Credentials submitted; token exchange or profile fetch in flight.
    Authenticating,
    /// Token persisted and profile fetched.
    Authenticated {
        token: SecureToken,
        user: UserRecord,
    },
}

impl StoreState for SessionState {}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }
}
