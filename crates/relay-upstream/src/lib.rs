//! Relay Upstream: `reqwest` transport to the marketing-automation API.

pub mod http_transport;
