//! Notification surface for user-visible status messages.

use crate::routes::Route;

/// Status notice emitted by the login controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An attempt has been accepted and is in flight.
    LoggingIn,
    /// The attempt succeeded; the user should be taken to `redirect`.
    LoginSucceeded { redirect: Route },
    /// The attempt failed. The cause is deliberately not part of the notice.
    LoginFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LoggingIn => "Logging in...",
            Notice::LoginSucceeded { .. } => "Login successful!",
            Notice::LoginFailed => "Login failed. Please try again.",
        }
    }
}

/// Displays notices to the user.
///
/// Called synchronously from the controller; implementations must not block.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}
