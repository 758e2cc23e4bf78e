//! Event ingestion endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use relay_core::error::DomainError;
use relay_pipeline::application::pipeline::{PipelineOutcome, SKIPPED_MISSING_IDENTITY};
use relay_pipeline::domain::commands::TrackEvent;

use crate::error::ApiError;
use crate::identity::VerifiedTenant;
use crate::state::AppState;

/// Response body for every terminal pipeline outcome.
///
/// Fields absent from an outcome are omitted from the JSON.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Whether the event was accepted.
    pub success: bool,
    /// Set on delivered and deduplicated events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduped: Option<bool>,
    /// Set on skipped events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    /// Why the event was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    /// Machine-readable failure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// The event identifier.
    #[serde(rename = "eventID", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Upstream response body on delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<Value>,
    /// Final upstream status on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
    /// Upstream response body on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_error: Option<Value>,
}

impl EventResponse {
    fn from_outcome(outcome: PipelineOutcome) -> (StatusCode, Self) {
        match outcome {
            PipelineOutcome::Skipped { .. } => (
                StatusCode::ACCEPTED,
                Self {
                    success: true,
                    skipped: Some(true),
                    reason: Some(SKIPPED_MISSING_IDENTITY),
                    ..Self::default()
                },
            ),
            PipelineOutcome::Deduped { event_id } => (
                StatusCode::OK,
                Self {
                    success: true,
                    deduped: Some(true),
                    event_id: Some(event_id),
                    ..Self::default()
                },
            ),
            PipelineOutcome::Delivered { event_id, upstream } => (
                StatusCode::OK,
                Self {
                    success: true,
                    deduped: Some(false),
                    event_id: Some(event_id),
                    upstream: Some(upstream),
                    ..Self::default()
                },
            ),
            PipelineOutcome::Rejected {
                event_id,
                status,
                upstream,
            } => (
                StatusCode::BAD_GATEWAY,
                Self {
                    error: Some("upstream_rejected"),
                    event_id: Some(event_id),
                    upstream_status: Some(status),
                    upstream_error: Some(upstream),
                    ..Self::default()
                },
            ),
            PipelineOutcome::DeliveryFailed { event_id, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self {
                    error: Some("delivery_failed"),
                    event_id: Some(event_id),
                    ..Self::default()
                },
            ),
        }
    }
}

/// POST /
///
/// The pipeline runs on its own task: once an event is claimed, delivery,
/// health update and audit complete even if the client disconnects.
#[instrument(skip(state, body), fields(tenant_id = %tenant_id))]
async fn track_event(
    State(state): State<AppState>,
    VerifiedTenant(tenant_id): VerifiedTenant,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = parse_body(&body)?;
    let command = TrackEvent {
        correlation_id: Uuid::new_v4(),
        tenant_id,
        body,
    };

    info!(correlation_id = %command.correlation_id, "handling track_event command");

    let pipeline = state.pipeline.clone();
    let outcome = tokio::spawn(async move { pipeline.handle(&command).await })
        .await
        .map_err(|e| DomainError::Infrastructure(format!("pipeline task failed: {e}")))??;

    let (status, response) = EventResponse::from_outcome(outcome);
    Ok((status, Json(response)).into_response())
}

/// Beacons post JSON under any content type, including none, so the body is
/// parsed here rather than by the `Json` extractor.
fn parse_body(raw: &[u8]) -> Result<Value, DomainError> {
    serde_json::from_slice(raw)
        .map_err(|e| DomainError::Validation(format!("request body is not valid JSON: {e}")))
}

/// Returns the events router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(track_event))
}
