//! Integration tests for the HTTP account client
//!
//! These tests use wiremock to stand in for the account service and
//! exercise the full request/response cycle and error classification.

use auth_client::{
    AuthClientConfig, AuthClientError, AuthEndpoint, HttpAuthClient, SignInRequest, SignUpRequest,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sign_in_request() -> SignInRequest {
    SignInRequest {
        email: "ada@example.com".to_string(),
        password: "hunter22".to_string(),
    }
}

fn client_for(server: &MockServer) -> HttpAuthClient {
    HttpAuthClient::new(AuthClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Successful Request Tests
// =============================================================================

#[tokio::test]
async fn test_sign_in_posts_json_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.sign_in(&sign_in_request()).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["token"], "abc");
}

#[tokio::test]
async fn test_sign_up_posts_name_email_password() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .and(body_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter22"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "Account created"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = SignUpRequest {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let response = client.sign_up(&request).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.message(), Some("Account created"));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .and(header("x-client", "storytime-ios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = AuthClientConfig::new(mock_server.uri()).with_header("X-Client", "storytime-ios");
    let client = HttpAuthClient::new(config).unwrap();

    assert!(client.sign_in(&sign_in_request()).await.is_ok());
}

// =============================================================================
// Error Classification Tests
// =============================================================================

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();

    assert_eq!(
        err,
        AuthClientError::Application {
            status: 401,
            message: Some("Invalid credentials".to_string())
        }
    );
}

#[tokio::test]
async fn test_error_field_on_ok_status_is_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Conflict",
            "message": "Email already registered"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = SignUpRequest {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let err = client.sign_up(&request).await.unwrap_err();

    assert_eq!(err.server_message(), Some("Email already registered"));
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Port 1 is reserved and nothing listens on it
    let config = AuthClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2));
    let client = HttpAuthClient::new(config).unwrap();

    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = AuthClientConfig::new(mock_server.uri()).with_timeout(Duration::from_secs(1));
    let client = HttpAuthClient::new(config).unwrap();

    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    assert!(err.is_transport());
}
