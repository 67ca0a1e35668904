//! Subscription Webhook - Stripe webhook receiver
//!
//! Verifies signed Stripe deliveries and records subscription changes
//! through the `SubscriptionStore` port.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
