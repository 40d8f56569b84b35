//! Login form validation.
//!
//! The per-field rules live on [`Credentials`] as `validator` derive rules.
//! This module runs them and folds the result into a [`FieldErrors`] mapping.

use validator::Validate;

use crate::domain::entities::{Credentials, Field, FieldError, FieldErrors};

/// Validates the current field values.
///
/// Every field is checked independently, so several errors can surface at
/// once. An empty mapping means the form is valid. The function is pure.
pub fn validate(credentials: &Credentials) -> FieldErrors {
    let Err(errors) = credentials.validate() else {
        return FieldErrors::new();
    };

    errors
        .field_errors()
        .into_iter()
        .filter_map(|(name, field_errors)| {
            let field = Field::from_name(&name)?;
            let error = field_errors
                .first()
                .and_then(|e| FieldError::from_code(&e.code))?;
            Some((field, error))
        })
        .collect()
}
