//! Subscription store port.
//!
//! The store owns persistence of subscription state. Webhook deliveries
//! are not ordered, so implementations must treat every save as an
//! idempotent upsert keyed by subscription id.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::subscription::SubscriptionUpdate;

/// Port for recording subscription changes reported by the payment provider.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Record the subscription described by `update`.
    ///
    /// `update.is_new_subscription` distinguishes a first save after
    /// checkout from a later change to an existing subscription.
    async fn save_subscription(&self, update: &SubscriptionUpdate) -> Result<(), StoreError>;
}

/// Errors returned by subscription store implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Subscription store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the update (e.g. unknown customer).
    #[error("Subscription update rejected: {0}")]
    Rejected(String),
}
