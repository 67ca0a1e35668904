//! Event dispatcher - routes verified events to the subscription store.
//!
//! Events outside the relevant set are acknowledged without side effects.
//! Relevant events are narrowed to a `SubscriptionEvent`, turned into a
//! `SubscriptionUpdate` and saved exactly once.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::subscription::SubscriptionUpdate;
use crate::ports::SubscriptionStore;

use super::errors::WebhookError;
use super::event::{EventKind, StripeEvent, SubscriptionEvent};

/// What the dispatcher did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Event type is not relevant; nothing was saved.
    Skipped,
    /// The update was saved to the store.
    Saved(SubscriptionUpdate),
}

/// Dispatches verified Stripe events by type.
#[derive(Clone)]
pub struct EventDispatcher {
    relevant_events: HashSet<String>,
    store: Arc<dyn SubscriptionStore>,
}

impl EventDispatcher {
    /// Creates a dispatcher acting on every handled event kind.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            relevant_events: EventKind::ALL
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            store,
        }
    }

    /// Replaces the relevant event set.
    ///
    /// A type listed here without a matching `EventKind` fails dispatch with
    /// `UnhandledEventType`.
    pub fn with_relevant_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relevant_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if events of this type are acted on.
    pub fn is_relevant(&self, event_type: &str) -> bool {
        self.relevant_events.contains(event_type)
    }

    /// Dispatches one event.
    ///
    /// # Errors
    ///
    /// - `UnhandledEventType` - relevant type with no typed handler
    /// - `InvalidObject` / `MissingField` - `data.object` has the wrong shape
    /// - `Persistence` - the store rejected the update
    pub async fn dispatch(&self, event: &StripeEvent) -> Result<DispatchOutcome, WebhookError> {
        if !self.is_relevant(&event.event_type) {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Ignoring irrelevant webhook event"
            );
            return Ok(DispatchOutcome::Skipped);
        }

        let kind = event
            .kind()
            .ok_or_else(|| WebhookError::UnhandledEventType(event.event_type.clone()))?;
        let typed = SubscriptionEvent::from_event(kind, event)?;
        let status = typed.status().map(str::to_string);
        let update = subscription_update(typed)?;

        self.store.save_subscription(&update).await?;

        tracing::info!(
            event_id = %event.id,
            event_type = %kind,
            subscription_id = %update.subscription_id,
            customer_id = %update.customer_id,
            is_new_subscription = update.is_new_subscription,
            status = status.as_deref().unwrap_or("-"),
            "Subscription saved"
        );

        Ok(DispatchOutcome::Saved(update))
    }
}

/// Extracts the update intent carried by a typed event.
fn subscription_update(event: SubscriptionEvent) -> Result<SubscriptionUpdate, WebhookError> {
    let missing = |field: &'static str| WebhookError::MissingField {
        event_type: EventKind::CheckoutSessionCompleted.to_string(),
        field,
    };

    match event {
        SubscriptionEvent::SubscriptionUpdated(subscription)
        | SubscriptionEvent::SubscriptionDeleted(subscription) => Ok(SubscriptionUpdate::changed(
            subscription.id,
            subscription.customer.id(),
        )),
        SubscriptionEvent::CheckoutCompleted(session) => {
            let subscription = session.subscription.ok_or_else(|| missing("subscription"))?;
            let customer = session.customer.ok_or_else(|| missing("customer"))?;
            Ok(SubscriptionUpdate::created(subscription.id(), customer.id()))
        }
    }
}
