//! In-memory adapters.

mod subscription_store;

pub use subscription_store::{InMemorySubscriptionStore, SubscriptionRecord};
