//! Submission controller: validate, authenticate, publish the outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::field_store::{FieldStore, FormEvent};
use super::session::AuthContext;
use super::validation::validate;
use crate::domain::entities::{
    Credentials, Field, FieldErrors, FormState, Identity, SubmissionState,
};
use crate::domain::ports::{Authenticator, Notice, Notifier};
use crate::error::FailureReason;
use crate::routes::Route;
use crate::utils::mask_identifier;

/// Result of a single [`SubmissionController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An attempt was already in flight; the request was discarded.
    Ignored,
    /// Validation failed; the authentication capability was not called.
    Invalid(FieldErrors),
    /// The user is now authenticated and should be taken to `redirect`.
    Succeeded { identity: Identity, redirect: Route },
    /// The attempt failed. The form keeps its values and can be resubmitted.
    Failed(FailureReason),
}

/// Result of the synchronous half of a submission.
enum Begin {
    Ignored,
    Invalid(FieldErrors),
    Accepted {
        attempt: u64,
        credentials: Credentials,
    },
}

/// Drives the login form through `Idle → Validating → Submitting →
/// Succeeded | Failed`.
///
/// The controller is meant to be shared (for example behind an `Arc`) between
/// the input handlers and the submit handler. While an attempt is in flight,
/// further submits return [`SubmitOutcome::Ignored`] and field edits keep
/// working without touching the request already sent.
///
/// An accepted attempt runs on its own task. Dropping the future returned by
/// [`submit`](Self::submit) stops waiting for the outcome but not the attempt,
/// which still settles the form and the session.
///
/// Only this controller moves the [`AuthContext`] to authenticated.
pub struct SubmissionController<A: Authenticator, N: Notifier> {
    form: Arc<FieldStore>,
    authenticator: Arc<A>,
    notifier: Arc<N>,
    session: Arc<AuthContext>,
    attempt_timeout: Duration,
    attempts: AtomicU64,
}

impl<A: Authenticator + 'static, N: Notifier + 'static> SubmissionController<A, N> {
    /// Creates a controller with a fresh, empty form.
    ///
    /// # Arguments
    ///
    /// - `authenticator` - capability invoked once per accepted submission
    /// - `notifier` - receives "Logging in...", success and failure notices
    /// - `session` - shared auth context updated on success
    /// - `attempt_timeout` - upper bound on a single authentication attempt
    pub fn new(
        authenticator: Arc<A>,
        notifier: Arc<N>,
        session: Arc<AuthContext>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            form: Arc::new(FieldStore::new()),
            authenticator,
            notifier,
            session,
            attempt_timeout,
            attempts: AtomicU64::new(0),
        }
    }

    pub fn form(&self) -> &FieldStore {
        &self.form
    }

    /// Shorthand for [`FieldStore::set_field`].
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn state(&self) -> FormState {
        self.form.snapshot()
    }

    /// Handles a submit request.
    ///
    /// Validation errors return [`SubmitOutcome::Invalid`] and leave the form
    /// `Idle`. A valid form is sent to the authenticator, bounded by the
    /// attempt timeout. Failures of any kind, including a panic inside the
    /// authenticator or the notifier, end in [`SubmitOutcome::Failed`].
    pub async fn submit(&self) -> SubmitOutcome {
        let (number, credentials) =
            match self.form.transition(|form, events| self.begin(form, events)) {
                Begin::Ignored => {
                    debug!("Submit ignored, attempt already in flight");
                    return SubmitOutcome::Ignored;
                }
                Begin::Invalid(errors) => {
                    info!(errors = errors.len(), "Submission rejected by validation");
                    return SubmitOutcome::Invalid(errors);
                }
                Begin::Accepted {
                    attempt,
                    credentials,
                } => (attempt, credentials),
            };

        info!(
            attempt = number,
            identifier = %mask_identifier(&credentials.identifier),
            "Login attempt started"
        );

        let attempt = Attempt {
            number,
            form: Arc::clone(&self.form),
            authenticator: Arc::clone(&self.authenticator),
            notifier: Arc::clone(&self.notifier),
            session: Arc::clone(&self.session),
            timeout: self.attempt_timeout,
        };

        // Spawned before the first await, so an accepted attempt always runs.
        match tokio::spawn(attempt.run(credentials)).await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!(attempt = number, error = %join_error, "Login attempt task failed");
                SubmitOutcome::Failed(FailureReason::Crashed)
            }
        }
    }

    /// Validates under the form lock and moves to `Submitting` if the form
    /// is valid. A previous `Succeeded` or `Failed` is left implicitly.
    fn begin(&self, form: &mut FormState, events: &mut Vec<FormEvent>) -> Begin {
        if form.state.is_submitting() {
            return Begin::Ignored;
        }

        form.state = SubmissionState::Validating;
        events.push(FormEvent::StateChanged {
            state: SubmissionState::Validating,
        });

        let errors = validate(&form.credentials);
        form.errors = errors.clone();
        events.push(FormEvent::ErrorsReplaced {
            errors: errors.clone(),
        });

        if !errors.is_empty() {
            form.state = SubmissionState::Idle;
            events.push(FormEvent::StateChanged {
                state: SubmissionState::Idle,
            });
            return Begin::Invalid(errors);
        }

        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        form.state = SubmissionState::Submitting { attempt };
        events.push(FormEvent::StateChanged {
            state: SubmissionState::Submitting { attempt },
        });

        Begin::Accepted {
            attempt,
            credentials: form.credentials.clone(),
        }
    }
}

/// One accepted submission, from the "Logging in..." notice to its outcome.
struct Attempt<A, N> {
    number: u64,
    form: Arc<FieldStore>,
    authenticator: Arc<A>,
    notifier: Arc<N>,
    session: Arc<AuthContext>,
    timeout: Duration,
}

impl<A: Authenticator + 'static, N: Notifier> Attempt<A, N> {
    async fn run(self, credentials: Credentials) -> SubmitOutcome {
        let _settle = SettleOnDrop {
            form: Arc::clone(&self.form),
            attempt: self.number,
        };

        self.notifier.notify(&Notice::LoggingIn);

        match self.authenticate(credentials).await {
            Ok(identity) => self.succeed(identity),
            Err(reason) => self.fail(reason),
        }
    }

    /// Runs the authenticator on its own task so a panic surfaces as a
    /// `JoinError` instead of unwinding through the attempt.
    async fn authenticate(&self, credentials: Credentials) -> Result<Identity, FailureReason> {
        let authenticator = Arc::clone(&self.authenticator);
        let mut handle = tokio::spawn(async move {
            authenticator
                .attempt_login(&credentials.identifier, &credentials.password)
                .await
        });

        match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(Ok(result)) => result.map_err(FailureReason::from),
            Ok(Err(join_error)) => {
                error!(attempt = self.number, error = %join_error, "Authenticator task failed");
                Err(FailureReason::Crashed)
            }
            Err(_) => {
                handle.abort();
                Err(FailureReason::TimedOut)
            }
        }
    }

    fn succeed(&self, identity: Identity) -> SubmitOutcome {
        self.session.set_authenticated(identity.clone());
        self.settle(SubmissionState::Succeeded {
            identity: identity.clone(),
        });

        let redirect = Route::Homepage;
        info!(attempt = self.number, identity = %identity, %redirect, "Login attempt succeeded");
        self.notifier.notify(&Notice::LoginSucceeded { redirect });

        SubmitOutcome::Succeeded { identity, redirect }
    }

    fn fail(&self, reason: FailureReason) -> SubmitOutcome {
        self.settle(SubmissionState::Failed {
            reason: reason.clone(),
        });

        warn!(attempt = self.number, %reason, "Login attempt failed");
        self.notifier.notify(&Notice::LoginFailed);

        SubmitOutcome::Failed(reason)
    }

    fn settle(&self, state: SubmissionState) {
        self.form.transition(|form, events| {
            form.state = state.clone();
            events.push(FormEvent::StateChanged { state });
        });
    }
}

/// Fails an attempt that is dropped while still `Submitting`, for example
/// when the notifier panics or the runtime shuts down mid-flight.
struct SettleOnDrop {
    form: Arc<FieldStore>,
    attempt: u64,
}

impl Drop for SettleOnDrop {
    fn drop(&mut self) {
        let attempt = self.attempt;
        self.form.transition(|form, events| {
            if form.state != (SubmissionState::Submitting { attempt }) {
                return;
            }
            error!(attempt, "Login attempt ended without an outcome");
            let state = SubmissionState::Failed {
                reason: FailureReason::Crashed,
            };
            form.state = state.clone();
            events.push(FormEvent::StateChanged { state });
        });
    }
}
