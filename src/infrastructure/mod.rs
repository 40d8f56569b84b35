//! Infrastructure layer implementing the domain ports.
//!
//! - [`auth`] - Authentication capability (simulated backend)
//! - [`notify`] - Notification surfaces

pub mod auth;
pub mod notify;
