//! Process-wide authentication session.
//!
//! [`AuthContext`] is created once at startup and owned by the application.
//! Writers hold the context itself. Everything else gets a [`SessionReader`],
//! which can read and await changes but has no mutation entry points.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::entities::{AuthSession, Identity};

/// Owner of the shared [`AuthSession`].
///
/// Every change is broadcast to all readers and subscribers.
pub struct AuthContext {
    tx: watch::Sender<AuthSession>,
}

impl AuthContext {
    /// Initializes the context with an anonymous session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSession::Anonymous);
        info!("Auth context initialized (anonymous)");
        Self { tx }
    }

    /// Returns a copy of the current session.
    pub fn current_session(&self) -> AuthSession {
        self.tx.borrow().clone()
    }

    /// Raw change subscription. The current value is already marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.tx.subscribe()
    }

    /// Read-only handle for consumers such as the router.
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            rx: self.tx.subscribe(),
        }
    }

    /// Marks the user as authenticated as `identity`.
    pub fn set_authenticated(&self, identity: Identity) {
        info!(identity = %identity, "Session authenticated");
        self.tx.send_replace(AuthSession::authenticated(identity));
    }

    /// Logs the user out. Returns `false` if the session was already anonymous.
    pub fn clear(&self) -> bool {
        self.revoke("logout")
    }

    /// Handles an authentication-expiry signal from the backend.
    ///
    /// Returns `false` if the session was already anonymous.
    pub fn expire(&self) -> bool {
        self.revoke("expired")
    }

    /// Tears the context down at the end of the application's lifetime.
    ///
    /// The session is cleared first so readers observe the logout, then the
    /// channel closes and pending [`SessionReader::changed`] calls return `None`.
    pub fn shutdown(self) {
        self.revoke("shutdown");
        debug!(readers = self.tx.receiver_count(), "Auth context shut down");
    }

    fn revoke(&self, cause: &'static str) -> bool {
        let revoked = self.tx.send_if_modified(|session| {
            if session.is_authenticated() {
                *session = AuthSession::Anonymous;
                true
            } else {
                false
            }
        });

        if revoked {
            info!(cause, "Session cleared");
        }
        revoked
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the shared session.
#[derive(Clone)]
pub struct SessionReader {
    rx: watch::Receiver<AuthSession>,
}

impl SessionReader {
    pub fn current(&self) -> AuthSession {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Waits for the next session change and returns the new value.
    ///
    /// Returns `None` once the [`AuthContext`] has been shut down.
    pub async fn changed(&mut self) -> Option<AuthSession> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
