//! Relay Pipeline: the event delivery core.
//!
//! Normalizes heterogeneous storefront events, redacts personal data for the
//! audit trail, claims idempotency keys, delivers to the upstream marketing
//! API with a bounded retry, and tracks per-tenant integration health.

pub mod application;
pub mod domain;
