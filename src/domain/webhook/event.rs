//! Stripe webhook event types.
//!
//! `StripeEvent` is the envelope exactly as Stripe sends it. Handled event
//! kinds are narrowed into the `SubscriptionEvent` sum type, whose variants
//! carry the typed `data.object` for that kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::errors::WebhookError;

/// Stripe webhook event envelope.
///
/// Only the fields needed for dispatch are captured; the rest of Stripe's
/// event schema is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default)]
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,

    /// API version used to render this event.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (shape depends on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Returns the known kind for this event's type, if any.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::parse(&self.event_type)
    }

    /// Deserializes `data.object` as the given type.
    fn object<T: DeserializeOwned>(&self) -> Result<T, WebhookError> {
        T::deserialize(&self.data.object).map_err(|e| WebhookError::InvalidObject {
            event_type: self.event_type.clone(),
            reason: e.to_string(),
        })
    }
}

/// Stripe event types this service knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,
    /// Customer subscription was updated.
    CustomerSubscriptionUpdated,
    /// Customer subscription was deleted.
    CustomerSubscriptionDeleted,
}

impl EventKind {
    /// Every handled kind; also the default relevant event set.
    pub const ALL: [EventKind; 3] = [
        EventKind::CheckoutSessionCompleted,
        EventKind::CustomerSubscriptionUpdated,
        EventKind::CustomerSubscriptionDeleted,
    ];

    /// Parse event kind from a Stripe type string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checkout.session.completed" => Some(Self::CheckoutSessionCompleted),
            "customer.subscription.updated" => Some(Self::CustomerSubscriptionUpdated),
            "customer.subscription.deleted" => Some(Self::CustomerSubscriptionDeleted),
            _ => None,
        }
    }

    /// Convert to the Stripe event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::CustomerSubscriptionUpdated => "customer.subscription.updated",
            Self::CustomerSubscriptionDeleted => "customer.subscription.deleted",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference Stripe may send either as a bare id or as an expanded object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object { id: String },
}

impl Expandable {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) | Expandable::Object { id } => id,
        }
    }
}

/// Stripe Checkout Session object (the fields we read).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSessionObject {
    /// Session identifier (cs_...).
    #[serde(default)]
    pub id: Option<String>,

    /// Customer created or attached during checkout.
    #[serde(default)]
    pub customer: Option<Expandable>,

    /// Subscription created by checkout; null for one-off payments.
    #[serde(default)]
    pub subscription: Option<Expandable>,
}

/// Stripe Subscription object (the fields we read).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriptionObject {
    /// Subscription identifier (sub_...).
    pub id: String,

    /// Customer owning this subscription.
    pub customer: Expandable,

    /// Subscription status as reported by Stripe.
    #[serde(default)]
    pub status: Option<String>,
}

/// A handled event with its typed payload.
#[derive(Debug, Clone)]
pub enum SubscriptionEvent {
    CheckoutCompleted(CheckoutSessionObject),
    SubscriptionUpdated(SubscriptionObject),
    SubscriptionDeleted(SubscriptionObject),
}

impl SubscriptionEvent {
    /// Narrows `event` into the variant for `kind`.
    ///
    /// # Errors
    ///
    /// `InvalidObject` when `data.object` does not match the kind's shape.
    pub fn from_event(kind: EventKind, event: &StripeEvent) -> Result<Self, WebhookError> {
        Ok(match kind {
            EventKind::CheckoutSessionCompleted => Self::CheckoutCompleted(event.object()?),
            EventKind::CustomerSubscriptionUpdated => Self::SubscriptionUpdated(event.object()?),
            EventKind::CustomerSubscriptionDeleted => Self::SubscriptionDeleted(event.object()?),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::CheckoutCompleted(_) => EventKind::CheckoutSessionCompleted,
            Self::SubscriptionUpdated(_) => EventKind::CustomerSubscriptionUpdated,
            Self::SubscriptionDeleted(_) => EventKind::CustomerSubscriptionDeleted,
        }
    }

    /// Subscription status carried by subscription events; checkout has none.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::CheckoutCompleted(_) => None,
            Self::SubscriptionUpdated(sub) | Self::SubscriptionDeleted(sub) => sub.status.as_deref(),
        }
    }
}
