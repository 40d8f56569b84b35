//! Domain layer containing the login flow's entities and collaborator interfaces.
//!
//! # Architecture
//!
//! - [`entities`] - Form values, validation errors, submission and session state
//! - [`ports`] - Traits for the authentication capability and notification surface
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Port traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod entities;
pub mod ports;
