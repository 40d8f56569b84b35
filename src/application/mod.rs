//! Application layer orchestrating the login flow.
//!
//! Services consume the domain ports and expose the operations a front end
//! drives: editing fields, submitting, and reading the shared session.
//!
//! # Available Services
//!
//! - [`services::validation::validate`] - Pure per-field validation
//! - [`services::field_store::FieldStore`] - Field values, errors and change events
//! - [`services::submission::SubmissionController`] - The submission state machine
//! - [`services::session::AuthContext`] - Process-wide session and its readers

pub mod services;
