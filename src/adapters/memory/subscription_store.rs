//! In-memory subscription store.
//!
//! Keeps one record per subscription id. Every save is an upsert, so
//! duplicate or reordered deliveries converge on the same record.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::subscription::SubscriptionUpdate;
use crate::ports::{StoreError, SubscriptionStore};

/// Stored state for one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub subscription_id: String,
    pub customer_id: String,
    /// When the subscription was first recorded.
    pub created_at: DateTime<Utc>,
    /// When the subscription was last written.
    pub updated_at: DateTime<Utc>,
    /// Number of saves applied to this record.
    pub revision: u64,
}

/// Subscription store backed by a `HashMap`.
///
/// Suitable for local development and tests; contents are lost on restart.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    records: RwLock<HashMap<String, SubscriptionRecord>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for a subscription, if any.
    pub async fn get(&self, subscription_id: &str) -> Option<SubscriptionRecord> {
        self.records.read().await.get(subscription_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn save_subscription(&self, update: &SubscriptionUpdate) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut records = self.records.write().await;

        match records.get_mut(&update.subscription_id) {
            Some(record) => {
                if update.is_new_subscription {
                    tracing::debug!(
                        subscription_id = %update.subscription_id,
                        "Checkout replayed for known subscription"
                    );
                }
                record.customer_id = update.customer_id.clone();
                record.updated_at = now;
                record.revision += 1;
            }
            None => {
                if !update.is_new_subscription {
                    tracing::debug!(
                        subscription_id = %update.subscription_id,
                        "Update arrived before checkout; creating record"
                    );
                }
                records.insert(
                    update.subscription_id.clone(),
                    SubscriptionRecord {
                        subscription_id: update.subscription_id.clone(),
                        customer_id: update.customer_id.clone(),
                        created_at: now,
                        updated_at: now,
                        revision: 1,
                    },
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_subscription_creates_record() {
        let store = InMemorySubscriptionStore::new();

        store
            .save_subscription(&SubscriptionUpdate::created("sub_1", "cus_1"))
            .await
            .unwrap();

        let record = store.get("sub_1").await.unwrap();
        assert_eq!(record.customer_id, "cus_1");
        assert_eq!(record.revision, 1);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn update_replaces_existing_record() {
        let store = InMemorySubscriptionStore::new();
        store
            .save_subscription(&SubscriptionUpdate::created("sub_1", "cus_1"))
            .await
            .unwrap();

        store
            .save_subscription(&SubscriptionUpdate::changed("sub_1", "cus_9"))
            .await
            .unwrap();

        let record = store.get("sub_1").await.unwrap();
        assert_eq!(record.customer_id, "cus_9");
        assert_eq!(record.revision, 2);
        assert!(record.updated_at >= record.created_at);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_checkout_is_idempotent() {
        let store = InMemorySubscriptionStore::new();
        let update = SubscriptionUpdate::created("sub_1", "cus_1");

        store.save_subscription(&update).await.unwrap();
        store.save_subscription(&update).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("sub_1").await.unwrap().customer_id, "cus_1");
    }

    #[tokio::test]
    async fn update_before_checkout_creates_record() {
        let store = InMemorySubscriptionStore::new();

        store
            .save_subscription(&SubscriptionUpdate::changed("sub_2", "cus_2"))
            .await
            .unwrap();

        assert!(store.get("sub_2").await.is_some());
    }

    #[tokio::test]
    async fn empty_store_has_no_records() {
        let store = InMemorySubscriptionStore::new();
        assert!(store.is_empty().await);
        assert!(store.get("sub_missing").await.is_none());
    }
}
