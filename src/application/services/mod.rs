//! Services of the login flow.

pub mod field_store;
pub mod session;
pub mod submission;
pub mod validation;

pub use field_store::{FieldStore, FormEvent};
pub use session::{AuthContext, SessionReader};
pub use submission::{SubmissionController, SubmitOutcome};
pub use validation::validate;
