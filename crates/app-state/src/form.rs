//! Credential form state
//!
//! A [`FormState`] is created when a sign-in or sign-up screen mounts and is
//! dropped when the screen goes away. It holds the field values, the errors
//! from the last validation pass, the submission lifecycle and the per-field
//! secret visibility toggles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::validation::ValidationReport;

/// Maximum length of password-type fields, in characters
pub const SECRET_MAX_LENGTH: usize = 32;

/// Maximum length of all other fields, in characters
pub const TEXT_MAX_LENGTH: usize = 50;

// =============================================================================
// Fields
// =============================================================================

/// A named, user-editable field
///
/// Ordering follows the on-screen order, which is also the order errors are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Display name (sign-up only)
    Name,
    /// Email address
    Email,
    /// Password
    Password,
    /// Password confirmation (sign-up only)
    ConfirmPassword,
}

impl FieldName {
    /// Key used for this field in payloads and view bindings
    pub fn key(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
        }
    }

    /// Human-readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::Email => "Email",
            FieldName::Password => "Password",
            FieldName::ConfirmPassword => "Confirm password",
        }
    }

    /// Whether the field holds a password and is masked by default
    pub fn is_secret(&self) -> bool {
        matches!(self, FieldName::Password | FieldName::ConfirmPassword)
    }

    /// Maximum number of characters accepted at entry
    pub fn max_length(&self) -> usize {
        if self.is_secret() {
            SECRET_MAX_LENGTH
        } else {
            TEXT_MAX_LENGTH
        }
    }
}

/// Which credential form a state belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    /// Existing account sign-in
    SignIn,
    /// New account registration
    SignUp,
}

impl FormKind {
    /// Fields of this form in display order
    pub fn fields(&self) -> &'static [FieldName] {
        match self {
            FormKind::SignIn => &[FieldName::Email, FieldName::Password],
            FormKind::SignUp => &[
                FieldName::Name,
                FieldName::Email,
                FieldName::Password,
                FieldName::ConfirmPassword,
            ],
        }
    }

    /// Whether the field belongs to this form
    pub fn has_field(&self, field: FieldName) -> bool {
        self.fields().contains(&field)
    }
}

// =============================================================================
// Submission Lifecycle
// =============================================================================

/// Submission lifecycle of a form
///
/// `Idle → Validating → Idle` when validation fails, otherwise
/// `Validating → Submitting → Succeeded | Failed`. A failed form may be
/// submitted again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum Submission {
    /// Nothing in flight
    #[default]
    Idle,
    /// Local validation running
    Validating,
    /// Request sent, awaiting the service
    Submitting,
    /// The service accepted the request
    Succeeded,
    /// The service or the transport rejected the request
    Failed(String),
}

impl Submission {
    /// Whether a new submission may start from this state
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Submission::Idle | Submission::Failed(_))
    }
}

// =============================================================================
// Form State
// =============================================================================

/// State of one credential form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    kind: FormKind,
    fields: BTreeMap<FieldName, String>,
    errors: BTreeMap<FieldName, String>,
    submission: Submission,
    secret_visibility: BTreeMap<FieldName, bool>,
}

impl FormState {
    /// Create an empty form of the given kind
    pub fn new(kind: FormKind) -> Self {
        let fields = kind.fields().iter().map(|f| (*f, String::new())).collect();
        let secret_visibility = kind
            .fields()
            .iter()
            .filter(|f| f.is_secret())
            .map(|f| (*f, false))
            .collect();

        Self {
            kind,
            fields,
            errors: BTreeMap::new(),
            submission: Submission::Idle,
            secret_visibility,
        }
    }

    /// Create an empty sign-in form
    pub fn sign_in() -> Self {
        Self::new(FormKind::SignIn)
    }

    /// Create an empty sign-up form
    pub fn sign_up() -> Self {
        Self::new(FormKind::SignUp)
    }

    /// Form kind
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Fields of this form in display order
    pub fn fields(&self) -> &'static [FieldName] {
        self.kind.fields()
    }

    /// Current value of a field (empty for fields the form does not have)
    pub fn value(&self, field: FieldName) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Error shown for a field, if any
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors
            .get(&field)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    /// All errors from the last validation pass, including empty verdicts
    pub fn errors(&self) -> &BTreeMap<FieldName, String> {
        &self.errors
    }

    /// Whether any field currently shows an error
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| !e.is_empty())
    }

    /// Current submission state
    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    /// Whether a request is in flight; the view disables inputs and the
    /// submit button while this is true
    pub fn is_submitting(&self) -> bool {
        self.submission == Submission::Submitting
    }

    /// Whether a secret field is currently revealed
    pub fn is_secret_visible(&self, field: FieldName) -> bool {
        self.secret_visibility.get(&field).copied().unwrap_or(false)
    }

    /// Set a field value
    ///
    /// The value is truncated to the field's maximum length. Any error on that
    /// field is cleared. Returns `false` without changing anything when the
    /// form is submitting or the field does not belong to this form.
    pub fn update_field(&mut self, field: FieldName, value: &str) -> bool {
        if self.is_submitting() || !self.kind.has_field(field) {
            tracing::debug!(field = field.key(), "field edit ignored");
            return false;
        }

        let capped: String = value.chars().take(field.max_length()).collect();
        self.fields.insert(field, capped);

        if let Some(error) = self.errors.get_mut(&field) {
            error.clear();
        }

        true
    }

    /// Flip masking for a secret field, returning the new visibility
    ///
    /// Returns `None` for fields that are not secret or not on this form.
    pub fn toggle_secret_visibility(&mut self, field: FieldName) -> Option<bool> {
        let visible = self.secret_visibility.get_mut(&field)?;
        *visible = !*visible;
        Some(*visible)
    }

    /// Enter `Validating` if a submission may start
    pub fn begin_validation(&mut self) -> bool {
        if !self.submission.accepts_submit() {
            return false;
        }
        self.submission = Submission::Validating;
        true
    }

    /// Store the result of a validation pass
    ///
    /// A clean report moves the form to `Submitting`; anything else returns it
    /// to `Idle`. Only valid while `Validating`. Returns whether the form is
    /// now submitting.
    pub fn finish_validation(&mut self, report: &ValidationReport) -> bool {
        if self.submission != Submission::Validating {
            return false;
        }

        self.errors = report.errors.clone();

        if report.is_valid {
            self.submission = Submission::Submitting;
            true
        } else {
            self.submission = Submission::Idle;
            false
        }
    }

    /// Replace the stored errors without touching the submission state
    pub fn set_errors(&mut self, report: &ValidationReport) {
        self.errors = report.errors.clone();
    }

    /// Record that the service accepted the request
    pub fn mark_succeeded(&mut self) -> bool {
        self.finish_submission(Submission::Succeeded)
    }

    /// Record that the request failed with a user-facing message
    pub fn mark_failed(&mut self, message: impl Into<String>) -> bool {
        self.finish_submission(Submission::Failed(message.into()))
    }

    fn finish_submission(&mut self, outcome: Submission) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.submission = outcome;
        true
    }

    /// Return to the state the form had when its screen mounted
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}
