//! Startup orchestration.
//!
//! # Responsibilities
//! - Snapshot the process environment (and optional env file) once
//! - Resolve the runtime mode before logging is initialized
//! - Validate and hand back the shared configuration
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The summary log records which integrations are configured, never values

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_with_mode, AppConfig, ConfigError, ConfigValidationError, RawEnv, RuntimeMode};

/// Startup state between reading the environment and validating it.
#[derive(Debug, Clone)]
pub struct Startup {
    env: RawEnv,
    mode: RuntimeMode,
}

impl Startup {
    /// Read the process environment, filling gaps from `env_file` if given.
    pub fn from_process(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut env = RawEnv::from_process();
        if let Some(path) = env_file {
            env.merge_env_file(path)?;
        }
        Ok(Self::from_env(env))
    }

    pub fn from_env(env: RawEnv) -> Self {
        let mode = env.mode();
        Self { env, mode }
    }

    /// Override the mode `APP_ENV` selected.
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Validate the environment. Consumes the raw snapshot.
    pub fn finish(self) -> Result<Arc<AppConfig>, ConfigValidationError> {
        let config = load_with_mode(&self.env, self.mode)?;
        let public = config.public();
        let server = config.server();

        tracing::info!(
            mode = %config.mode(),
            app_url = %public.app_url,
            backend_url = %public.backend_url,
            service_role = server.backend_service_role_key.is_some(),
            payments = server.payments_enabled(),
            email = server.email_enabled(),
            "Configuration loaded"
        );

        if server.payments_secret_key.is_some() != server.payments_webhook_secret.is_some() {
            tracing::warn!("Payments partially configured; both secret key and webhook secret are needed");
        }

        Ok(Arc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> RawEnv {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_mode_taken_from_env() {
        let startup = Startup::from_env(env(&[("APP_ENV", "development")]));
        assert_eq!(startup.mode(), RuntimeMode::Development);
    }

    #[test]
    fn test_mode_override() {
        let startup = Startup::from_env(env(&[("APP_ENV", "development")])).with_mode(RuntimeMode::Production);
        assert_eq!(startup.mode(), RuntimeMode::Production);
    }

    #[test]
    fn test_finish_ready() {
        let config = Startup::from_env(env(&[
            ("BACKEND_URL", "https://x.test"),
            ("BACKEND_ANON_KEY", "abc"),
            ("PAYMENTS_SECRET_KEY", "sk"),
        ]))
        .finish()
        .unwrap();

        assert_eq!(config.public().backend_anon_key, "abc");
        assert!(!config.server().payments_enabled());
    }

    #[test]
    fn test_finish_failed() {
        let err = Startup::from_env(RawEnv::new()).finish().unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }
}
