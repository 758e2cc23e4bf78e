//! Commands carried from the HTTP layer into the pipeline.

use uuid::Uuid;

/// A unit of work performed for one tenant.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in spans and logs, e.g. `events.track_event`.
    fn command_type(&self) -> &'static str;

    /// Per-request id tying together every log line of one run.
    fn correlation_id(&self) -> Uuid;

    /// The verified tenant; all reads and writes are scoped to it.
    fn tenant_id(&self) -> Uuid;
}
