//! Response bodies for the webhook endpoint.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned for every accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub ok: bool,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Generic failure body for deliveries that verified but could not be processed.
///
/// Carries no detail about the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookFailure {
    pub error: String,
}

impl WebhookFailure {
    pub const HANDLER_FAILED: &'static str = "Webhook handler failed";

    pub fn handler_failed() -> Self {
        Self {
            error: Self::HANDLER_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_serializes_as_ok_true() {
        let json = serde_json::to_string(&WebhookAck::ok()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn failure_serializes_generic_message() {
        let json = serde_json::to_string(&WebhookFailure::handler_failed()).unwrap();
        assert_eq!(json, r#"{"error":"Webhook handler failed"}"#);
    }
}
