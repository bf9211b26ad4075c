//! Request and response payloads for the account service

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AuthClientError;

/// Body of a sign-in request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Body of a sign-up request
///
/// The confirmation password is checked locally and never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Chosen password
    pub password: String,
}

/// Successful response from the account service
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body (`Null` when the service sent none)
    pub body: Value,
}

impl AuthResponse {
    /// Message field of the body, if present
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Fields the service uses to describe a failure
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

impl FailureBody {
    fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    fn has_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    fn error_text(&self) -> Option<String> {
        match &self.error {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Classify a raw HTTP response from the account service
///
/// Non-2xx statuses and bodies carrying an `error` field are rejections;
/// a 2xx body that is not JSON is a transport failure.
pub fn classify_response(status: u16, body: &str) -> Result<AuthResponse, AuthClientError> {
    let success = (200..300).contains(&status);

    if !success {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| FailureBody::from_value(&value).message);
        return Err(AuthClientError::Application { status, message });
    }

    let body = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body).map_err(|e| {
            AuthClientError::Transport(format!("Failed to parse JSON: {}", e))
        })?
    };

    let failure = FailureBody::from_value(&body);
    if failure.has_error() {
        let message = failure.message.clone().or_else(|| failure.error_text());
        return Err(AuthClientError::Application { status, message });
    }

    Ok(AuthResponse { status, body })
}
