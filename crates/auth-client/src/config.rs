//! Client configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for the account service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthClientConfig {
    /// Base service URL (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Path of the sign-in endpoint
    pub sign_in_path: String,
    /// Path of the sign-up endpoint
    pub sign_up_path: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            sign_in_path: "/api/user/login".to_string(),
            sign_up_path: "/api/user/register".to_string(),
            timeout_ms: 30_000,
            user_agent: format!("StoryTime/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl AuthClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Override the sign-in endpoint path
    pub fn with_sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }

    /// Override the sign-up endpoint path
    pub fn with_sign_up_path(mut self, path: impl Into<String>) -> Self {
        self.sign_up_path = path.into();
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the sign-in endpoint
    pub fn sign_in_url(&self) -> String {
        join_url(&self.base_url, &self.sign_in_path)
    }

    /// Full URL of the sign-up endpoint
    pub fn sign_up_url(&self) -> String {
        join_url(&self.base_url, &self.sign_up_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
