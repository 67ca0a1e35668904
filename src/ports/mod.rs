//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionStore` - Records subscription changes reported by Stripe

mod subscription_store;

pub use subscription_store::{StoreError, SubscriptionStore};
