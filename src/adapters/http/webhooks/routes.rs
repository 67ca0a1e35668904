//! Axum router configuration for the webhook endpoint.

use axum::routing::any;
use axum::Router;

use super::handlers::{handle_stripe_webhook, WebhookAppState};

/// Create the Stripe webhook router.
///
/// Webhooks don't carry user authentication; they are verified by
/// signature inside the handler.
///
/// # Routes
/// - `POST /webhooks` - Handle Stripe webhooks (other methods get 405)
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/webhooks", any(handle_stripe_webhook))
}

/// Create the webhook module router, mounted at `/api`.
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new().nest("/api", webhook_routes())
}
