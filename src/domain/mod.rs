//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `subscription` - Subscription update intent
//! - `webhook` - Stripe webhook verification and event dispatch

pub mod subscription;
pub mod webhook;
