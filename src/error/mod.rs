pub(crate) mod internal;

use std::fmt;

// Authorization failures are resolved to redirect decisions by the guard and
// never thrown into rendering paths. The variants here cover the flows that
// do surface to callers: credential checks, session mutations and
// administrative actions.
#[derive(Debug)]
pub enum CustodiaError {
    // Login credential verification failed. The session slot is untouched.
    InvalidCredentials,
    // No current principal for an operation that requires one.
    Unauthenticated,
    // The backend reported an authentication failure (401) mid-session.
    // By the time this surfaces the session slot has already been cleared.
    SessionExpired,
    // A non-admin principal attempted an administrative mutation. Rejected
    // before any backend call is made.
    AdministrativeActionDenied,
    UsernameTaken { username: String },
    UserNotFound { id: u64 },
    Internal(String),
}

impl CustodiaError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, CustodiaError::Unauthenticated)
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, CustodiaError::SessionExpired)
    }
}

impl fmt::Display for CustodiaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustodiaError::InvalidCredentials => write!(f, "invalid credentials"),
            CustodiaError::Unauthenticated => write!(f, "unauthenticated"),
            CustodiaError::SessionExpired => write!(f, "session expired"),
            CustodiaError::AdministrativeActionDenied => {
                write!(f, "administrative action denied")
            }
            CustodiaError::UsernameTaken { username } => {
                write!(f, "username already taken: {}", username)
            }
            CustodiaError::UserNotFound { id } => write!(f, "user not found: {}", id),
            CustodiaError::Internal(description) => write!(f, "internal error: {}", description),
        }
    }
}

impl std::error::Error for CustodiaError {}

impl From<internal::Error> for CustodiaError {
    fn from(err: internal::Error) -> Self {
        CustodiaError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for CustodiaError {
    fn from(err: std::io::Error) -> Self {
        CustodiaError::Internal(err.to_string())
    }
}

impl From<serde_yaml::Error> for CustodiaError {
    fn from(err: serde_yaml::Error) -> Self {
        CustodiaError::Internal(err.to_string())
    }
}
