//! Webhook error types for Stripe webhook handling.
//!
//! Every failure a delivery can hit falls into one of two classes:
//! verification failures (the request is rejected with its error text) and
//! processing failures (the request is answered with a generic message).

use http::StatusCode;
use thiserror::Error;

use super::body::BodyError;
use crate::ports::StoreError;

/// Errors that occur while receiving and processing a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body stream failed before it was fully read.
    #[error("Unable to read request body: {0}")]
    BodyRead(#[from] BodyError),

    /// No `Stripe-Signature` header was sent.
    #[error("No stripe-signature header value was provided")]
    MissingSignature,

    /// The `Stripe-Signature` header could not be parsed.
    #[error("Unable to extract timestamp and signatures from header: {0}")]
    MalformedHeader(String),

    /// None of the supplied signatures match the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Signature timestamp is older than the configured tolerance.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Signature timestamp is in the future beyond clock skew tolerance.
    #[error("Timestamp is too far in the future")]
    InvalidTimestamp,

    /// Signed payload is not a valid event envelope.
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// Event type is relevant but has no typed handler.
    #[error("Unhandled event: {0}")]
    UnhandledEventType(String),

    /// Required field missing from the event's data object.
    #[error("Missing field `{field}` on {event_type} object")]
    MissingField {
        event_type: String,
        field: &'static str,
    },

    /// Event data object does not have the shape its type promises.
    #[error("Invalid {event_type} object: {reason}")]
    InvalidObject { event_type: String, reason: String },

    /// The subscription store rejected the update.
    #[error("Failed to save subscription: {0}")]
    Persistence(#[from] StoreError),
}

impl WebhookError {
    /// Returns true for errors raised before the event was trusted.
    ///
    /// These are answered with their error text; everything else goes
    /// through the generic failure response.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::BodyRead(_)
                | WebhookError::MissingSignature
                | WebhookError::MalformedHeader(_)
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
                | WebhookError::InvalidPayload(_)
        )
    }

    /// Returns true if Stripe should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Persistence(_))
    }

    /// Maps the error to the HTTP status code sent back to Stripe.
    ///
    /// - 4xx: Stripe stops retrying
    /// - 5xx: Stripe retries on its own schedule
    pub fn status_code(&self) -> StatusCode {
        if self.is_verification_failure() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
