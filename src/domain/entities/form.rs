//! Login form state: field errors and the submission state machine.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::credentials::{Credentials, Field};
use super::session::Identity;
use crate::error::FailureReason;

/// A per-field validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldError {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "invalid format")]
    InvalidFormat,
    #[serde(rename = "too short")]
    TooShort,
}

impl FieldError {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidFormat => "invalid format",
            FieldError::TooShort => "too short",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "required" => Some(FieldError::Required),
            "invalid format" => Some(FieldError::InvalidFormat),
            "too short" => Some(FieldError::TooShort),
            _ => None,
        }
    }

    /// Inline message shown next to the offending field.
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Identifier, FieldError::Required) => "Email or phone number is required",
            (Field::Identifier, _) => "Please enter a valid email or phone number",
            (Field::Password, FieldError::Required) => "Password is required",
            (Field::Password, _) => "Password must be at least 6 characters",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mapping of field to its current error.
///
/// A field with no entry is valid. An empty mapping means the whole form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Removes the entry for `field`, returning whether one existed.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl FromIterator<(Field, FieldError)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, FieldError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Phase of the submission state machine.
///
/// `Succeeded` and `Failed` are not terminal: the next submit request starts
/// a new cycle from `Validating`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    /// An authentication attempt is in flight.
    Submitting { attempt: u64 },
    Succeeded { identity: Identity },
    Failed { reason: FailureReason },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting { .. } => "submitting",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

/// Point-in-time snapshot of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub credentials: Credentials,
    pub errors: FieldErrors,
    pub state: SubmissionState,
}

impl FormState {
    pub fn identifier(&self) -> &str {
        &self.credentials.identifier
    }

    pub fn password(&self) -> &str {
        &self.credentials.password
    }

    /// True exactly while an authentication attempt is outstanding.
    pub fn submitting(&self) -> bool {
        self.state.is_submitting()
    }

    /// Label of the submit button for the current phase.
    pub fn button_label(&self) -> &'static str {
        if self.submitting() {
            "Logging in..."
        } else {
            "Log in"
        }
    }
}
