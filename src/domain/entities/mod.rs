//! Core domain entities of the login flow.
//!
//! Entities are plain data structures. The orchestration that mutates them
//! lives in [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`Credentials`] - Raw field values and their validation rules
//! - [`FormState`] - Snapshot of the form: values, errors and [`SubmissionState`]
//! - [`AuthSession`] - Anonymous or authenticated as an [`Identity`]

pub mod credentials;
pub mod form;
pub mod session;

pub use credentials::{Credentials, Field};
pub use form::{FieldError, FieldErrors, FormState, SubmissionState};
pub use session::{AuthSession, Identity};
