//! Stripe webhook domain.
//!
//! # Module Structure
//!
//! - `body` - Raw body aggregation
//! - `signature` - Stripe-Signature parsing and verification
//! - `event` - Event envelope and typed subscription events
//! - `dispatcher` - Routes relevant events to the subscription store
//! - `errors` - WebhookError with HTTP status mapping

mod body;
mod dispatcher;
mod errors;
mod event;
mod signature;

pub use body::{aggregate_body, BodyChunk, BodyError};
pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use errors::WebhookError;
pub use event::{
    CheckoutSessionObject, EventKind, Expandable, StripeEvent, StripeEventData,
    SubscriptionEvent, SubscriptionObject,
};
pub use signature::{
    signature_header_for, SignatureHeader, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS,
};
