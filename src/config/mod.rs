//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SUBSCRIPTION_WEBHOOK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use subscription_webhook::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod payment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe webhook signing)
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SUBSCRIPTION_WEBHOOK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUBSCRIPTION_WEBHOOK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SUBSCRIPTION_WEBHOOK__PAYMENT__STRIPE_WEBHOOK_SECRET=whsec_...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUBSCRIPTION_WEBHOOK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "SUBSCRIPTION_WEBHOOK__PAYMENT__STRIPE_WEBHOOK_SECRET",
            "whsec_xxx",
        );
    }

    fn clear_env() {
        env::remove_var("SUBSCRIPTION_WEBHOOK__PAYMENT__STRIPE_WEBHOOK_SECRET");
        env::remove_var("SUBSCRIPTION_WEBHOOK__PAYMENT__WEBHOOK_TOLERANCE_SECS");
        env::remove_var("SUBSCRIPTION_WEBHOOK__PAYMENT__RELEVANT_EVENTS");
        env::remove_var("SUBSCRIPTION_WEBHOOK__SERVER__PORT");
        env::remove_var("SUBSCRIPTION_WEBHOOK__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.stripe_webhook_secret, "whsec_xxx");
        assert_eq!(config.payment.webhook_tolerance_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUBSCRIPTION_WEBHOOK__SERVER__PORT", "3000");
        env::set_var("SUBSCRIPTION_WEBHOOK__SERVER__ENVIRONMENT", "production");
        env::set_var("SUBSCRIPTION_WEBHOOK__PAYMENT__WEBHOOK_TOLERANCE_SECS", "600");
        env::set_var(
            "SUBSCRIPTION_WEBHOOK__PAYMENT__RELEVANT_EVENTS",
            "checkout.session.completed, customer.subscription.deleted",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.payment.webhook_tolerance_secs, 600);
        assert_eq!(
            config.payment.relevant_events_list(),
            vec![
                "checkout.session.completed".to_string(),
                "customer.subscription.deleted".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let result = AppConfig::load();

        assert!(result.is_err());
    }
}
