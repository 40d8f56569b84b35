//! Field values, field errors and form change events.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::entities::{Field, FieldErrors, FormState, SubmissionState};

/// Capacity of the form event channel. Slow subscribers skip ahead.
const EVENT_CAPACITY: usize = 64;

/// Change event emitted by the [`FieldStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field was edited. `cleared_error` is set if the edit removed its error.
    FieldChanged { field: Field, cleared_error: bool },
    /// A validation pass replaced the whole error mapping.
    ErrorsReplaced { errors: FieldErrors },
    /// The submission state machine moved to a new phase.
    StateChanged { state: SubmissionState },
}

/// Holds the login form and broadcasts every change to subscribers.
///
/// The lock is only held for the duration of a single mutation and never
/// across an await point.
pub struct FieldStore {
    form: Mutex<FormState>,
    events: broadcast::Sender<FormEvent>,
}

impl FieldStore {
    /// Creates an empty form: blank fields, no errors, `Idle`.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            form: Mutex::new(FormState::default()),
            events,
        }
    }

    /// Sets `field` to the raw `value` and clears that field's error, if any.
    ///
    /// Errors on other fields are left untouched. Edits are accepted in every
    /// state, including while an attempt is in flight; they only affect the
    /// next submission.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.transition(|form, events| {
            form.credentials.set(field, value.into());
            let cleared_error = form.errors.clear(field);
            if cleared_error {
                debug!(%field, "Field edited, error cleared");
            }
            events.push(FormEvent::FieldChanged {
                field,
                cleared_error,
            });
        });
    }

    /// Returns a copy of the current form.
    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Applies `f` to the form and broadcasts the events it pushed.
    ///
    /// Events go out before the lock is released, so subscribers see them in
    /// the same order as the mutations they describe.
    pub(crate) fn transition<R>(
        &self,
        f: impl FnOnce(&mut FormState, &mut Vec<FormEvent>) -> R,
    ) -> R {
        let mut form = self.lock();
        let mut events = Vec::new();
        let result = f(&mut *form, &mut events);
        for event in events {
            // No subscribers is not an error.
            let _ = self.events.send(event);
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}
