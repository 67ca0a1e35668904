//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum webhook endpoint
//! - `memory` - In-memory subscription store

pub mod http;
pub mod memory;

pub use memory::InMemorySubscriptionStore;
