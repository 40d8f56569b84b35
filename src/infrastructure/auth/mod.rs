//! Authentication capability implementations.

mod simulated;

pub use simulated::{SimulatedAuthenticator, SimulatedOutcome};
