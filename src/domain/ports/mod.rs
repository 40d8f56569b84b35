//! Interfaces to the collaborators the login flow depends on.
//!
//! - [`Authenticator`] - The external operation that verifies credentials
//! - [`Notifier`] - The surface that shows status messages
//!
//! Implementations live in [`crate::infrastructure`]. Mock implementations are
//! generated via `mockall` for unit tests.

pub mod authenticator;
pub mod notifier;

pub use authenticator::Authenticator;
pub use notifier::{Notice, Notifier};

#[cfg(test)]
pub use authenticator::MockAuthenticator;
#[cfg(test)]
pub use notifier::MockNotifier;
