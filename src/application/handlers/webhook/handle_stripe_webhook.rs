//! HandleStripeWebhookHandler - Command handler for Stripe webhook deliveries.

use std::sync::Arc;

use axum::body::Bytes;

use crate::domain::subscription::SubscriptionUpdate;
use crate::domain::webhook::{DispatchOutcome, EventDispatcher, StripeWebhookVerifier, WebhookError};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Bytes,
    /// `Stripe-Signature` header value, if one was sent.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStripeWebhookResult {
    /// Relevant event; the subscription was saved.
    SubscriptionSaved {
        event_id: String,
        update: SubscriptionUpdate,
    },
    /// Event acknowledged but not acted on.
    Ignored { event_id: String, event_type: String },
}

/// Verifies a delivery and dispatches the event it carries.
#[derive(Clone)]
pub struct HandleStripeWebhookHandler {
    verifier: Arc<StripeWebhookVerifier>,
    dispatcher: EventDispatcher,
}

impl HandleStripeWebhookHandler {
    pub fn new(verifier: Arc<StripeWebhookVerifier>, dispatcher: EventDispatcher) -> Self {
        Self {
            verifier,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, cmd.signature.as_deref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook signature verification failed");
                e
            })?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            "Webhook signature verified"
        );

        // 2. Dispatch based on event type
        match self.dispatcher.dispatch(&event).await {
            Ok(DispatchOutcome::Saved(update)) => Ok(HandleStripeWebhookResult::SubscriptionSaved {
                event_id: event.id,
                update,
            }),
            Ok(DispatchOutcome::Skipped) => Ok(HandleStripeWebhookResult::Ignored {
                event_id: event.id,
                event_type: event.event_type,
            }),
            Err(e) => {
                tracing::error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    retryable = e.is_retryable(),
                    error = %e,
                    "Webhook handler failed"
                );
                Err(e)
            }
        }
    }
}
