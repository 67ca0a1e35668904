//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe webhooks)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Maximum accepted age of a webhook signature, in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,

    /// Event types to act on (comma-separated); defaults to every handled type
    #[serde(default)]
    pub relevant_events: Option<String>,
}

impl PaymentConfig {
    /// Create a configuration with defaults for everything but the secret.
    pub fn new(stripe_webhook_secret: impl Into<String>) -> Self {
        Self {
            stripe_webhook_secret: stripe_webhook_secret.into(),
            webhook_tolerance_secs: default_webhook_tolerance(),
            relevant_events: None,
        }
    }

    /// Get configured relevant event types as a vector
    ///
    /// Empty when no override is configured.
    pub fn relevant_events_list(&self) -> Vec<String> {
        self.relevant_events
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify secret prefix for safety
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if self.webhook_tolerance_secs <= 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }

        if self.relevant_events.is_some() && self.relevant_events_list().is_empty() {
            return Err(ValidationError::EmptyRelevantEvents);
        }

        Ok(())
    }
}

fn default_webhook_tolerance() -> i64 {
    300
}
