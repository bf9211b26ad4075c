//! reqwest implementation of [`AuthEndpoint`]

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Serialize;

use crate::config::AuthClientConfig;
use crate::types::{classify_response, AuthResponse, SignInRequest, SignUpRequest};
use crate::{AuthClientError, AuthEndpoint, Result};

/// HTTP client for the StoryTime account service
///
/// # Examples
/// ```
/// use auth_client::{AuthClientConfig, AuthEndpoint, HttpAuthClient, SignInRequest};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpAuthClient::new(AuthClientConfig::new("http://localhost:3000"))?;
///
///     let request = SignInRequest {
///         email: "ada@example.com".to_string(),
///         password: "hunter22".to_string(),
///     };
///     let response = client.sign_in(&request).await?;
///     println!("Signed in ({})", response.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: ReqwestClient,
    config: AuthClientConfig,
}

impl HttpAuthClient {
    /// Create a new client
    ///
    /// Fails when the timeout is zero or the underlying client cannot be built.
    pub fn new(config: AuthClientConfig) -> Result<Self> {
        if config.timeout_ms == 0 {
            return Err(AuthClientError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| AuthClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &AuthClientConfig {
        &self.config
    }

    /// POST a JSON body and classify the response
    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<AuthResponse> {
        let mut req = self
            .client
            .post(url)
            .header("Content-Type", "application/json");

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        let payload = serde_json::to_vec(body)
            .map_err(|e| AuthClientError::Transport(format!("Failed to encode body: {}", e)))?;

        tracing::debug!(url, "sending account request");

        let response = req.body(payload).send().await.map_err(|e| {
            tracing::warn!(url, error = %e, "account request failed");
            AuthClientError::Transport(format!("Request failed: {}", e))
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthClientError::Transport(format!("Failed to read response: {}", e)))?;

        let result = classify_response(status, &text);
        if let Err(err) = &result {
            tracing::debug!(url, status, error = %err, "account request rejected");
        }
        result
    }
}

#[async_trait]
impl AuthEndpoint for HttpAuthClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthResponse> {
        self.post_json(&self.config.sign_in_url(), request).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthResponse> {
        self.post_json(&self.config.sign_up_url(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_new() {
        let config = AuthClientConfig::new("http://localhost:3000")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("TestAgent/1.0");

        let client = HttpAuthClient::new(config).unwrap();
        assert_eq!(client.config().timeout_ms, 5_000);
        assert_eq!(client.config().user_agent, "TestAgent/1.0");
    }

    #[test]
    fn test_client_rejects_zero_timeout() {
        let config = AuthClientConfig::default().with_timeout(Duration::ZERO);
        let err = HttpAuthClient::new(config).unwrap_err();
        assert!(matches!(err, AuthClientError::Config(_)));
    }

    #[test]
    fn test_client_accepts_sub_second_timeout() {
        let config = AuthClientConfig::default().with_timeout(Duration::from_millis(250));
        let client = HttpAuthClient::new(config).unwrap();
        assert_eq!(client.config().timeout(), Duration::from_millis(250));
    }

    // Request/response behaviour is covered against a mock server in tests/
}
