//! Authentication capability interface.

use async_trait::async_trait;

use crate::domain::entities::Identity;
use crate::error::AuthError;

/// Verifies credentials and yields an identity.
///
/// The login controller invokes this at most once per accepted submission
/// and never retries. Retries, if wanted, belong to the implementation.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth::SimulatedAuthenticator`] - Fixed-latency stand-in backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Attempts to log in with the raw identifier and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the credentials are refused and
    /// [`AuthError::Transport`] when the backend cannot answer.
    async fn attempt_login(&self, identifier: &str, password: &str) -> Result<Identity, AuthError>;
}
