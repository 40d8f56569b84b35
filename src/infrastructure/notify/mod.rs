//! Notification surfaces.
//!
//! Provides two [`crate::domain::ports::Notifier`] implementations:
//! - [`TracingNotifier`] - Writes notices to the log
//! - [`NullNotifier`] - Discards notices

mod null_notifier;
mod tracing_notifier;

pub use null_notifier::NullNotifier;
pub use tracing_notifier::TracingNotifier;
