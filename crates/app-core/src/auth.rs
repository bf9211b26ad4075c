//! Credential form controller
//!
//! This module runs the sign-in and sign-up submission flow: local validation,
//! one request to the account service, and exactly one user-visible
//! notification per attempt.

use app_state::{validate, FieldName, FormKind, FormState, ValidationReport};
use auth_client::{AuthClientError, AuthEndpoint, SignInRequest, SignUpRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Message shown when the service gives no usable explanation
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

const VALIDATION_TITLE: &str = "Validation Error";
const ERROR_TITLE: &str = "Error";
const SUCCESS_TITLE: &str = "Success";

// =============================================================================
// Collaborators
// =============================================================================

/// Where the app goes after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    /// Post-sign-in landing surface
    Home,
    /// Sign-in screen (after creating an account)
    SignIn,
}

/// A dialog request for the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Dialog title
    pub title: String,
    /// Dialog body
    pub message: String,
}

impl Alert {
    /// Create a new alert
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives navigation requests
pub trait Navigator: Send + Sync {
    /// Go to a named destination
    fn navigate(&self, destination: Destination);
}

/// Presents alerts to the user
pub trait Alerter: Send + Sync {
    /// Show a dialog
    fn alert(&self, alert: Alert);
}

// =============================================================================
// Submission
// =============================================================================

/// Result of a call to [`CredentialFormController::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight (or had already succeeded)
    Ignored,
    /// Validation failed; carries the message shown in the alert
    Invalid(String),
    /// The service accepted the credentials
    Succeeded,
    /// The request failed; carries the message shown in the alert
    Failed(String),
}

enum Credentials {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
}

impl Credentials {
    fn from_form(form: &FormState) -> Self {
        let field = |name: FieldName| form.value(name).to_string();
        match form.kind() {
            FormKind::SignIn => Credentials::SignIn(SignInRequest {
                email: field(FieldName::Email),
                password: field(FieldName::Password),
            }),
            FormKind::SignUp => Credentials::SignUp(SignUpRequest {
                name: field(FieldName::Name),
                email: field(FieldName::Email),
                password: field(FieldName::Password),
            }),
        }
    }
}

fn success_message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::SignIn => "Logged in successfully!",
        FormKind::SignUp => "Account created successfully!",
    }
}

fn success_destination(kind: FormKind) -> Destination {
    match kind {
        FormKind::SignIn => Destination::Home,
        FormKind::SignUp => Destination::SignIn,
    }
}

fn failure_message(error: &AuthClientError) -> String {
    error
        .server_message()
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_string()
}

/// Returns an in-flight form to rest if `submit` never reaches a terminal
/// transition (future dropped, endpoint panicked)
struct InFlight {
    form: Option<Arc<RwLock<FormState>>>,
}

impl InFlight {
    fn new(form: Arc<RwLock<FormState>>) -> Self {
        Self { form: Some(form) }
    }

    fn disarm(&mut self) {
        self.form = None;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };

        tracing::warn!("submission abandoned before completion");

        if let Ok(mut guard) = form.try_write() {
            guard.mark_failed(GENERIC_FAILURE_MESSAGE);
            return;
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                form.write().await.mark_failed(GENERIC_FAILURE_MESSAGE);
            });
        }
    }
}

/// Controller behind one sign-in or sign-up screen
///
/// The form lock is never held across the network call, so the view can
/// render the `Submitting` state and further submits are ignored while the
/// request is outstanding.
///
/// # Example
///
/// ```rust,no_run
/// use app_core::auth::{Alert, Alerter, CredentialFormController, Destination, Navigator};
/// use app_state::FieldName;
/// use auth_client::{AuthClientConfig, HttpAuthClient};
/// use std::sync::Arc;
///
/// struct Log;
/// impl Navigator for Log {
///     fn navigate(&self, destination: Destination) {
///         println!("-> {:?}", destination);
///     }
/// }
/// impl Alerter for Log {
///     fn alert(&self, alert: Alert) {
///         println!("{}: {}", alert.title, alert.message);
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpAuthClient::new(AuthClientConfig::default())?;
///     let controller =
///         CredentialFormController::sign_in(Arc::new(client), Arc::new(Log), Arc::new(Log));
///
///     controller.update_field(FieldName::Email, "ada@example.com").await;
///     controller.update_field(FieldName::Password, "hunter22").await;
///     let outcome = controller.submit().await;
///     println!("{:?}", outcome);
///     Ok(())
/// }
/// ```
pub struct CredentialFormController {
    form: Arc<RwLock<FormState>>,
    endpoint: Arc<dyn AuthEndpoint>,
    navigator: Arc<dyn Navigator>,
    alerter: Arc<dyn Alerter>,
}

impl CredentialFormController {
    /// Create a controller for a freshly mounted form
    pub fn new(
        kind: FormKind,
        endpoint: Arc<dyn AuthEndpoint>,
        navigator: Arc<dyn Navigator>,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        Self {
            form: Arc::new(RwLock::new(FormState::new(kind))),
            endpoint,
            navigator,
            alerter,
        }
    }

    /// Create a sign-in controller
    pub fn sign_in(
        endpoint: Arc<dyn AuthEndpoint>,
        navigator: Arc<dyn Navigator>,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        Self::new(FormKind::SignIn, endpoint, navigator, alerter)
    }

    /// Create a sign-up controller
    pub fn sign_up(
        endpoint: Arc<dyn AuthEndpoint>,
        navigator: Arc<dyn Navigator>,
        alerter: Arc<dyn Alerter>,
    ) -> Self {
        Self::new(FormKind::SignUp, endpoint, navigator, alerter)
    }

    /// Copy of the current form state for rendering
    pub async fn snapshot(&self) -> FormState {
        self.form.read().await.clone()
    }

    /// Whether a request is in flight
    pub async fn is_submitting(&self) -> bool {
        self.form.read().await.is_submitting()
    }

    /// Apply a field edit from the view
    pub async fn update_field(&self, field: FieldName, value: &str) -> bool {
        let mut form = self.form.write().await;
        let applied = form.update_field(field, value);
        if applied {
            tracing::debug!(field = field.key(), "field updated");
        }
        applied
    }

    /// Flip masking on a password field
    pub async fn toggle_secret_visibility(&self, field: FieldName) -> Option<bool> {
        self.form.write().await.toggle_secret_visibility(field)
    }

    /// Validate the form and store the verdicts without submitting
    pub async fn validate(&self) -> ValidationReport {
        let mut form = self.form.write().await;
        let report = validate(&form);
        if !form.is_submitting() {
            form.set_errors(&report);
        }
        report
    }

    /// Return the form to its freshly mounted state
    ///
    /// Ignored while a request is in flight.
    pub async fn reset(&self) -> bool {
        let mut form = self.form.write().await;
        if form.is_submitting() {
            return false;
        }
        form.reset();
        true
    }

    /// Validate and submit the form
    ///
    /// Every call that gets past the in-flight guard produces exactly one
    /// alert. Calls that reach the network end in `Succeeded` or `Failed`.
    /// If the returned future is dropped mid-request the form is put in
    /// `Failed` with the generic message, without an alert.
    pub async fn submit(&self) -> SubmitOutcome {
        let (kind, credentials) = {
            let mut form = self.form.write().await;

            if !form.begin_validation() {
                tracing::debug!(submission = ?form.submission(), "submit ignored");
                return SubmitOutcome::Ignored;
            }

            let report = validate(&form);
            if !form.finish_validation(&report) {
                drop(form);
                let message = report.first_error().unwrap_or_default().to_string();
                tracing::debug!(%message, "validation failed");
                self.alerter.alert(Alert::new(VALIDATION_TITLE, message.clone()));
                return SubmitOutcome::Invalid(message);
            }

            (form.kind(), Credentials::from_form(&form))
        };

        let mut in_flight = InFlight::new(self.form.clone());
        tracing::info!(?kind, "submitting credentials");

        let result = match &credentials {
            Credentials::SignIn(request) => self.endpoint.sign_in(request).await,
            Credentials::SignUp(request) => self.endpoint.sign_up(request).await,
        };

        match result {
            Ok(response) => {
                self.form.write().await.mark_succeeded();
                in_flight.disarm();
                tracing::info!(?kind, status = response.status, "credentials accepted");

                self.alerter
                    .alert(Alert::new(SUCCESS_TITLE, success_message(kind)));
                self.navigator.navigate(success_destination(kind));
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                let message = failure_message(&err);
                self.form.write().await.mark_failed(message.clone());
                in_flight.disarm();
                tracing::warn!(?kind, error = %err, "submission failed");

                self.alerter.alert(Alert::new(ERROR_TITLE, message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }
}
