//! HTTP handler for Stripe webhook deliveries.
//!
//! The handler reads the body as a raw stream so the exact signed bytes
//! reach the verifier; no JSON extractor runs before verification.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::webhook::{HandleStripeWebhookCommand, HandleStripeWebhookHandler};
use crate::config::PaymentConfig;
use crate::domain::webhook::{aggregate_body, EventDispatcher, StripeWebhookVerifier, WebhookError};
use crate::ports::SubscriptionStore;

use super::dto::{WebhookAck, WebhookFailure};

/// Header carrying Stripe's signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook endpoint.
///
/// Cloned per request; collaborators are `Arc`-wrapped.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<StripeWebhookVerifier>,
    pub dispatcher: EventDispatcher,
}

impl WebhookAppState {
    pub fn new(verifier: Arc<StripeWebhookVerifier>, dispatcher: EventDispatcher) -> Self {
        Self {
            verifier,
            dispatcher,
        }
    }

    /// Wire the verifier and dispatcher from payment configuration.
    pub fn from_config(payment: &PaymentConfig, store: Arc<dyn SubscriptionStore>) -> Self {
        let verifier = StripeWebhookVerifier::new(payment.stripe_webhook_secret.clone())
            .with_tolerance_secs(payment.webhook_tolerance_secs);

        let mut dispatcher = EventDispatcher::new(store);
        let relevant_events = payment.relevant_events_list();
        if !relevant_events.is_empty() {
            dispatcher = dispatcher.with_relevant_events(relevant_events);
        }

        Self::new(Arc::new(verifier), dispatcher)
    }

    /// Create the webhook handler from the shared state.
    pub fn webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(self.verifier.clone(), self.dispatcher.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handler
// ════════════════════════════════════════════════════════════════════════════════

/// Receive a Stripe webhook delivery.
///
/// Mounted with `any` so the method gate can answer non-POST requests with
/// the plain-text 405 body Stripe tooling expects.
pub async fn handle_stripe_webhook(
    State(state): State<WebhookAppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<WebhookAck>, WebhookApiError> {
    if method != Method::POST {
        return Err(WebhookApiError::MethodNotAllowed);
    }

    let payload = aggregate_body(body.into_data_stream())
        .await
        .map_err(WebhookError::from)?;

    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandleStripeWebhookCommand { payload, signature };
    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAck::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook failures to HTTP responses.
#[derive(Debug)]
pub enum WebhookApiError {
    /// Anything other than POST.
    MethodNotAllowed,
    /// Verification or processing failure.
    Webhook(WebhookError),
}

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self::Webhook(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        match self {
            WebhookApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                "Method not allowed",
            )
                .into_response(),
            // Verification failures expose their text so senders can fix the request.
            WebhookApiError::Webhook(err) if err.is_verification_failure() => {
                (err.status_code(), format!("Webhook error: {}", err)).into_response()
            }
            WebhookApiError::Webhook(err) => {
                (err.status_code(), Json(WebhookFailure::handler_failed())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn method_not_allowed_sets_allow_header() {
        let response = WebhookApiError::MethodNotAllowed.into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
        assert_eq!(body_string(response).await, "Method not allowed");
    }

    #[tokio::test]
    async fn verification_failure_exposes_error_text() {
        let response = WebhookApiError::from(WebhookError::InvalidSignature).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Webhook error: No signatures found matching the expected signature for payload"
        );
    }

    #[tokio::test]
    async fn processing_failure_hides_error_detail() {
        let err = WebhookError::Persistence(StoreError::Unavailable("secret dsn".to_string()));

        let response = WebhookApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_string(response).await, r#"{"error":"Webhook handler failed"}"#);
    }
}
