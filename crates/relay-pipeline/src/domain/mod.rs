//! Pure domain logic: no I/O.

pub mod aliases;
pub mod cleaning;
pub mod commands;
pub mod contact;
pub mod event;
pub mod event_id;
pub mod normalizer;
pub mod redaction;
