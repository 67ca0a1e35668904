//! HTTP adapter for the Stripe webhook endpoint.
//!
//! - `POST /api/webhooks` - Receive a signed Stripe event
//!
//! Any other method is answered with `405 Method not allowed`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{WebhookAck, WebhookFailure};
pub use handlers::{handle_stripe_webhook, WebhookApiError, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
