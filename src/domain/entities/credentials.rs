//! Login form field values and the per-field validation rules.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::utils::mask_identifier;

/// Email shape: `local@domain.tld` with no whitespace or extra `@` in any part.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Minimum number of digits for an identifier to count as a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Minimum raw password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The two named inputs of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Identifier,
    Password,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Identifier, Field::Password];

    /// Form-level name of the field, as used in error mappings.
    pub fn name(self) -> &'static str {
        match self {
            Field::Identifier => "identifier",
            Field::Password => "password",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "identifier" => Some(Field::Identifier),
            "password" => Some(Field::Password),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw values currently entered in the form.
///
/// Values are stored exactly as typed. Trimming only happens inside the
/// emptiness checks, never on the stored value.
#[derive(Clone, Default, PartialEq, Eq, Validate)]
pub struct Credentials {
    /// Email address or phone number.
    #[validate(custom(function = "validate_identifier"))]
    pub identifier: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Returns the raw value of `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Identifier => &self.identifier,
            Field::Password => &self.password,
        }
    }

    /// Replaces the raw value of `field`.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Identifier => self.identifier = value,
            Field::Password => self.password = value,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &mask_identifier(&self.identifier))
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returns true if `value` has the shape of an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Returns true if `value` carries at least [`MIN_PHONE_DIGITS`] digits once
/// every non-digit character is stripped.
///
/// Separators are ignored, so `555-123-4567` and `(555) 123 4567` both qualify.
pub fn is_phone_number(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    if is_email(value) || is_phone_number(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid format"))
    }
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("too short"));
    }

    Ok(())
}
