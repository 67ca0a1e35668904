//! Subscription update intent handed to the subscription store.

use serde::{Deserialize, Serialize};

/// A request to record the current state of a Stripe subscription.
///
/// `is_new_subscription` is true only when the update comes from a
/// completed checkout; subscription updated/deleted events always carry
/// `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    pub subscription_id: String,
    pub customer_id: String,
    pub is_new_subscription: bool,
}

impl SubscriptionUpdate {
    /// Update for a subscription just created through checkout.
    pub fn created(subscription_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            customer_id: customer_id.into(),
            is_new_subscription: true,
        }
    }

    /// Update for a change to an existing subscription.
    pub fn changed(subscription_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            customer_id: customer_id.into(),
            is_new_subscription: false,
        }
    }
}
