//! Local validation of credential forms
//!
//! Validation runs before any network request. Every field of the form gets
//! a verdict on every pass; an empty message means the field is fine.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::form::{FieldName, FormKind, FormState};

/// Minimum password length on sign-up
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum name length on sign-up
pub const MIN_NAME_LENGTH: usize = 2;

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// True iff every verdict is empty
    pub is_valid: bool,
    /// One verdict per field of the form
    pub errors: BTreeMap<FieldName, String>,
}

impl ValidationReport {
    /// Error for a field, if any
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors
            .get(&field)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    /// First error in display order, used for the summary alert
    pub fn first_error(&self) -> Option<&str> {
        self.errors.values().map(String::as_str).find(|e| !e.is_empty())
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        // local@domain.tld, no whitespace or extra @ in any part
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Whether a string has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate every field of a form
///
/// Pure: the same field values always produce the same report.
pub fn validate(form: &FormState) -> ValidationReport {
    let errors: BTreeMap<FieldName, String> = form
        .fields()
        .iter()
        .map(|field| (*field, check_field(form, *field).unwrap_or_default()))
        .collect();

    let is_valid = errors.values().all(String::is_empty);

    ValidationReport { is_valid, errors }
}

fn required(field: FieldName) -> String {
    format!("{} is required", field.label())
}

fn check_field(form: &FormState, field: FieldName) -> Option<String> {
    let value = form.value(field);

    match field {
        FieldName::Name => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Some(required(field))
            } else if trimmed.chars().count() < MIN_NAME_LENGTH {
                Some(format!("Name must be at least {} characters", MIN_NAME_LENGTH))
            } else {
                None
            }
        }
        FieldName::Email => {
            if value.trim().is_empty() {
                Some(required(field))
            } else if !is_valid_email(value) {
                Some("Please enter a valid email".to_string())
            } else {
                None
            }
        }
        FieldName::Password => {
            if value.trim().is_empty() {
                Some(required(field))
            } else if form.kind() == FormKind::SignUp
                && value.chars().count() < MIN_PASSWORD_LENGTH
            {
                Some(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ))
            } else {
                None
            }
        }
        FieldName::ConfirmPassword => {
            if value != form.value(FieldName::Password) {
                Some("Passwords do not match".to_string())
            } else {
                None
            }
        }
    }
}
