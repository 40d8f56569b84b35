//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the login
//! flow is wired up.
//!
//! ```bash
//! export AUTH_TIMEOUT_MS="10000"
//! export SIMULATED_LATENCY_MS="1000"
//! export SIMULATED_OUTCOME="accept"
//! ```
//!
//! ## Optional Variables
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `AUTH_TIMEOUT_MS` - Upper bound on one authentication attempt (default: 10000)
//! - `SIMULATED_LATENCY_MS` - Delay of the simulated backend (default: 1000)
//! - `SIMULATED_OUTCOME` - `accept` or `reject` (default: `accept`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::infrastructure::auth::SimulatedOutcome;

/// Longest accepted attempt timeout, in milliseconds.
const MAX_AUTH_TIMEOUT_MS: u64 = 300_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: String,
    /// Upper bound on a single authentication attempt, in milliseconds.
    /// An attempt that runs longer ends in the `Failed` state.
    pub auth_timeout_ms: u64,
    /// Delay of the simulated authentication backend, in milliseconds.
    pub simulated_latency_ms: u64,
    /// How the simulated backend answers every attempt.
    pub simulated_outcome: SimulatedOutcome,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let auth_timeout_ms = parse_var("AUTH_TIMEOUT_MS", 10_000)?;
        let simulated_latency_ms = parse_var("SIMULATED_LATENCY_MS", 1_000)?;

        let simulated_outcome = match env::var("SIMULATED_OUTCOME") {
            Ok(raw) => raw
                .parse::<SimulatedOutcome>()
                .map_err(|e| anyhow::anyhow!("Invalid SIMULATED_OUTCOME: {}", e))?,
            Err(_) => SimulatedOutcome::Accept,
        };

        Ok(Self {
            log_level,
            log_format,
            auth_timeout_ms,
            simulated_latency_ms,
            simulated_outcome,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `auth_timeout_ms` is zero or above five minutes
    /// - `simulated_latency_ms` is not below `auth_timeout_ms`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.auth_timeout_ms == 0 || self.auth_timeout_ms > MAX_AUTH_TIMEOUT_MS {
            anyhow::bail!(
                "AUTH_TIMEOUT_MS must be between 1 and {}, got {}",
                MAX_AUTH_TIMEOUT_MS,
                self.auth_timeout_ms
            );
        }

        if self.simulated_latency_ms >= self.auth_timeout_ms {
            anyhow::bail!(
                "SIMULATED_LATENCY_MS ({}) must be below AUTH_TIMEOUT_MS ({})",
                self.simulated_latency_ms,
                self.auth_timeout_ms
            );
        }

        Ok(())
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Auth timeout: {}ms", self.auth_timeout_ms);
        tracing::info!(
            "  Simulated backend: {} after {}ms",
            self.simulated_outcome,
            self.simulated_latency_ms
        );
    }
}

/// Reads a numeric variable, falling back to `default` when unset.
fn parse_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
