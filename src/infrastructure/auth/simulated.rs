//! Stand-in authentication backend with fixed latency.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::domain::entities::Identity;
use crate::domain::ports::Authenticator;
use crate::error::AuthError;
use crate::utils::mask_identifier;

/// Number of random bytes in an issued identity token.
const TOKEN_BYTES: usize = 16;

/// How the simulated backend answers every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Accept,
    Reject,
}

impl FromStr for SimulatedOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(SimulatedOutcome::Accept),
            "reject" => Ok(SimulatedOutcome::Reject),
            other => Err(format!("expected 'accept' or 'reject', got '{}'", other)),
        }
    }
}

impl fmt::Display for SimulatedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatedOutcome::Accept => f.write_str("accept"),
            SimulatedOutcome::Reject => f.write_str("reject"),
        }
    }
}

/// Authenticator that waits `latency` and then answers with `outcome`.
///
/// Accepted attempts receive a fresh random hex token as their identity.
/// Credentials are not checked against anything.
pub struct SimulatedAuthenticator {
    latency: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedAuthenticator {
    pub fn new(latency: Duration, outcome: SimulatedOutcome) -> Self {
        Self { latency, outcome }
    }

    /// Configured latency in whole milliseconds, saturating at `u64::MAX`.
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn attempt_login(&self, identifier: &str, _password: &str) -> Result<Identity, AuthError> {
        debug!(
            identifier = %mask_identifier(identifier),
            latency_ms = self.latency_ms(),
            "Simulated login call"
        );
        tokio::time::sleep(self.latency).await;

        match self.outcome {
            SimulatedOutcome::Accept => Ok(Identity::new(generate_token())),
            SimulatedOutcome::Reject => Err(AuthError::Rejected("Invalid credentials".into())),
        }
    }
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}
