//! Application services that sequence the domain logic against the ports.

pub mod delivery;
pub mod pipeline;
pub mod query_handlers;
