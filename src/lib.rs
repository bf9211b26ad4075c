//! StoryTime
//!
//! Facade over the workspace crates: configuration, logging setup and the
//! [`App`] composition root that wires the account client, router and alert
//! queue into the sign-in and sign-up controllers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;

pub use app_core::auth::{Alert, CredentialFormController, Destination, SubmitOutcome};
pub use app_state::{FieldName, FormKind, FormState, Submission};
pub use app_ui::{AlertQueue, Route, Router};
pub use auth_client::{AuthClientConfig, HttpAuthClient};
pub use config::{AppConfig, ConfigError};

use anyhow::Context;
use auth_client::AuthEndpoint;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {:?}", default_filter))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(())
}

/// Shared services for the running app
pub struct App {
    config: AppConfig,
    endpoint: Arc<dyn AuthEndpoint>,
    router: Arc<Router>,
    alerts: Arc<AlertQueue>,
}

impl App {
    /// Build the app from configuration, talking to the configured service
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = HttpAuthClient::new(config.api.clone())
            .context("failed to create account client")?;
        tracing::info!(base_url = %config.api.base_url, "account client ready");
        Ok(Self::with_endpoint(config, Arc::new(client)))
    }

    /// Build the app around an existing account endpoint
    pub fn with_endpoint(config: AppConfig, endpoint: Arc<dyn AuthEndpoint>) -> Self {
        Self {
            config,
            endpoint,
            router: Arc::new(Router::new()),
            alerts: Arc::new(AlertQueue::new()),
        }
    }

    /// Install the global subscriber using the configured `log_filter`
    pub fn init_tracing(&self) -> anyhow::Result<()> {
        init_tracing(&self.config.log_filter)
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared router
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Shared alert queue
    pub fn alerts(&self) -> &Arc<AlertQueue> {
        &self.alerts
    }

    /// Controller for a freshly mounted form screen
    pub fn form_controller(&self, kind: FormKind) -> CredentialFormController {
        CredentialFormController::new(
            kind,
            self.endpoint.clone(),
            self.router.clone(),
            self.alerts.clone(),
        )
    }

    /// Controller for the sign-in screen
    pub fn sign_in_controller(&self) -> CredentialFormController {
        self.form_controller(FormKind::SignIn)
    }

    /// Controller for the sign-up screen
    pub fn sign_up_controller(&self) -> CredentialFormController {
        self.form_controller(FormKind::SignUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_init_tracing_twice_fails() {
        // Either this call or an earlier one installed the subscriber
        let _ = init_tracing("info");
        assert!(init_tracing("info").is_err());
    }

    #[test]
    fn test_app_init_tracing_uses_configured_filter() {
        let mut config = AppConfig::default();
        config.log_filter = "app_core=debug,warn".to_string();
        let app = App::new(config).unwrap();
        assert_eq!(app.config().log_filter, "app_core=debug,warn");

        let _ = app.init_tracing();
        assert!(app.init_tracing().is_err());
    }

    #[test]
    fn test_app_init_tracing_rejects_bad_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let mut config = AppConfig::default();
        config.log_filter = "app_core=notalevel".to_string();
        let app = App::new(config).unwrap();

        let err = app.init_tracing().unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }

    #[tokio::test]
    async fn test_controllers_start_fresh() {
        let app = App::new(AppConfig::default()).unwrap();
        let controller = app.sign_up_controller();
        assert_eq!(controller.snapshot().await, FormState::sign_up());
        assert_eq!(app.router().current_route(), Route::Onboarding);
        assert!(app.alerts().is_empty());
    }
}
