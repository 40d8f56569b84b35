//! Authenticated identity and the process-wide session value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading characters kept when an identity is rendered for logs.
const VISIBLE_PREFIX: usize = 6;

/// Opaque identity token handed out by the authentication capability.
///
/// `Debug` and `Display` only reveal a short prefix. Use [`Identity::as_str`]
/// when the full value is needed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short, log-safe rendering of the token.
    pub fn redacted(&self) -> String {
        if self.0.chars().count() <= VISIBLE_PREFIX {
            return "***".to_string();
        }
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        format!("{prefix}***")
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&self.redacted()).finish()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Whether, and as whom, the user is currently authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthSession {
    #[default]
    Anonymous,
    Authenticated {
        identity: Identity,
        authenticated_at: DateTime<Utc>,
    },
}

impl AuthSession {
    /// Creates an authenticated session stamped with the current time.
    pub fn authenticated(identity: Identity) -> Self {
        Self::Authenticated {
            identity,
            authenticated_at: Utc::now(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthSession::Authenticated { .. })
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthSession::Anonymous => None,
            AuthSession::Authenticated { identity, .. } => Some(identity),
        }
    }
}
