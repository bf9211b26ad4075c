//! StoryTime authentication client
//!
//! This crate talks to the remote account service used by the sign-in and
//! sign-up screens. It provides the request/response types, the
//! [`AuthEndpoint`] seam the form controller depends on, and a reqwest-backed
//! implementation of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod http;
pub mod types;

pub use config::AuthClientConfig;
pub use http::HttpAuthClient;
pub use types::{AuthResponse, SignInRequest, SignUpRequest};

use async_trait::async_trait;

/// Result type for authentication requests
pub type Result<T> = std::result::Result<T, AuthClientError>;

/// Errors returned by the account service or the transport in front of it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthClientError {
    /// The request never produced a usable response (unreachable host,
    /// timeout, unreadable or non-JSON body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered and rejected the request
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Application {
        /// HTTP status code
        status: u16,
        /// Message supplied by the service, if any
        message: Option<String>,
    },

    /// The HTTP client could not be built from the configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthClientError {
    /// Message provided by the service, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthClientError::Application { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Whether this error came from the transport rather than the service
    pub fn is_transport(&self) -> bool {
        matches!(self, AuthClientError::Transport(_))
    }
}

/// Remote operations the credential forms submit to
///
/// Implementations own any timeout or retry policy; callers await exactly one
/// response per call.
#[async_trait]
pub trait AuthEndpoint: Send + Sync {
    /// Authenticate an existing account
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse>;

    /// Register a new account
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthClientError::Application {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid credentials");

        let err = AuthClientError::Application { status: 500, message: None };
        assert_eq!(err.to_string(), "API error (500): no message");
    }

    #[test]
    fn test_server_message() {
        let err = AuthClientError::Application {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.server_message(), Some("Email already registered"));

        let blank = AuthClientError::Application { status: 400, message: Some("  ".to_string()) };
        assert_eq!(blank.server_message(), None);

        let transport = AuthClientError::Transport("connection refused".to_string());
        assert_eq!(transport.server_message(), None);
        assert!(transport.is_transport());
    }
}
