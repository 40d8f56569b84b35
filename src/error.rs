//! Error types for the authentication capability and failed attempts.

use std::fmt;

/// Error returned by an [`crate::domain::ports::Authenticator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend refused the credentials.
    #[error("Credentials rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or answered unexpectedly.
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Why an authentication attempt ended in the `Failed` state.
///
/// All reasons map to the same user-visible notice. The distinction is kept
/// for logs and for callers that want to inspect the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Rejected(String),
    Transport(String),
    /// No answer within the configured attempt timeout.
    TimedOut,
    /// The authentication capability panicked.
    Crashed,
}

impl From<AuthError> for FailureReason {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected(reason) => FailureReason::Rejected(reason),
            AuthError::Transport(reason) => FailureReason::Transport(reason),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Rejected(reason) => write!(f, "rejected: {}", reason),
            FailureReason::Transport(reason) => write!(f, "transport: {}", reason),
            FailureReason::TimedOut => f.write_str("timed out"),
            FailureReason::Crashed => f.write_str("authenticator crashed"),
        }
    }
}
