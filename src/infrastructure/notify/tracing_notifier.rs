//! Notifier that writes notices to the log.

use tracing::{info, warn};

use crate::domain::ports::{Notice, Notifier};

/// Logs every notice. Failures are logged at `WARN`, the rest at `INFO`.
///
/// Used where no interactive surface exists, such as one-shot submissions
/// from scripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::LoginFailed => warn!(notice = notice.message(), "User notice"),
            Notice::LoginSucceeded { redirect } => {
                info!(notice = notice.message(), %redirect, "User notice")
            }
            Notice::LoggingIn => info!(notice = notice.message(), "User notice"),
        }
    }
}
