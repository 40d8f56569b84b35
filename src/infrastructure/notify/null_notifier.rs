//! No-op notifier for headless use.

use tracing::debug;

use crate::domain::ports::{Notice, Notifier};

/// A notifier that discards every notice.
///
/// Used by embedders that read outcomes from [`crate::application::services::SubmitOutcome`]
/// or the form event stream instead of a notification surface.
pub struct NullNotifier;

impl NullNotifier {
    /// Creates a new NullNotifier instance.
    pub fn new() -> Self {
        debug!("Using NullNotifier (notices disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NullNotifier {
    fn notify(&self, _notice: &Notice) {}
}
