//! Relay Core: shared abstractions for the event delivery pipeline.
//!
//! This crate defines the ports (ledger, integration store, audit log,
//! upstream transport) and the error taxonomy every other crate depends on.
//! It contains no infrastructure code.

pub mod audit;
pub mod clock;
pub mod command;
pub mod error;
pub mod integration;
pub mod ledger;
pub mod rng;
pub mod upstream;
