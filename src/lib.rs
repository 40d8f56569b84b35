//! # Login Gate
//!
//! Client-side login flow: form validation, a submission state machine, and
//! the process-wide authentication session that the rest of an application
//! reads to decide which pages are reachable.
//!
//! ## Architecture
//!
//! The crate keeps clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Form, validation and session entities plus collaborator traits
//! - **Application Layer** ([`application`]) - Field store, validator, submission controller, auth context
//! - **Infrastructure Layer** ([`infrastructure`]) - Simulated authenticator and notifiers
//! - **Routes** ([`routes`]) - Route table and session-gated navigation
//!
//! ## Flow
//!
//! 1. Input handlers call [`application::services::FieldStore::set_field`]
//! 2. A submit request runs [`application::services::SubmissionController::submit`]
//! 3. Valid forms are sent to a [`domain::ports::Authenticator`] with a bounded timeout
//! 4. Success updates the shared [`application::services::AuthContext`]
//! 5. [`routes::RouteGuard`] observes the session and re-resolves the current page
//!
//! ## Configuration
//!
//! Runtime settings are loaded from environment variables via [`config::Config`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod utils;

pub use error::{AuthError, FailureReason};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthContext, FieldStore, FormEvent, SessionReader, SubmissionController, SubmitOutcome,
        validate,
    };
    pub use crate::domain::entities::{
        AuthSession, Credentials, Field, FieldError, FieldErrors, FormState, Identity,
        SubmissionState,
    };
    pub use crate::domain::ports::{Authenticator, Notice, Notifier};
    pub use crate::error::{AuthError, FailureReason};
    pub use crate::routes::{Navigation, Route, RouteGuard};
}
