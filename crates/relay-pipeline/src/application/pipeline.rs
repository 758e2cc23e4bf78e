//! The event pipeline orchestrator.
//!
//! Per request: normalize → classify (skip / not connected / dedupe / send)
//! → deliver → update integration health → audit. Steps run strictly in this
//! order; delivery never starts before a successful ledger claim.

use std::sync::Arc;

use relay_core::audit::{AuditEntry, AuditLog};
use relay_core::clock::Clock;
use relay_core::command::Command;
use relay_core::error::DomainError;
use relay_core::integration::{IntegrationRecord, IntegrationRepository};
use relay_core::ledger::{Claim, IdempotencyLedger};
use relay_core::upstream::TransportError;
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::application::delivery::DeliveryClient;
use crate::domain::commands::TrackEvent;
use crate::domain::event::NormalizedEvent;
use crate::domain::normalizer::normalize;
use crate::domain::redaction::redact;

/// Reason reported for events without a usable contact identity.
pub const SKIPPED_MISSING_IDENTITY: &str = "skipped_missing_identity";

/// Audit status code for skipped events.
pub const AUDIT_STATUS_SKIPPED: u16 = 202;

/// Audit status code for deduplicated events.
pub const AUDIT_STATUS_DEDUPED: u16 = 208;

/// Audit status code for transport failures.
pub const AUDIT_STATUS_TRANSPORT_FAILURE: u16 = 500;

/// Terminal outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// No contact identity; acknowledged without delivery.
    Skipped {
        /// Identifier the event would have used.
        event_id: String,
    },
    /// Another request already claimed this identifier.
    Deduped {
        /// The claimed identifier.
        event_id: String,
    },
    /// The upstream accepted the event.
    Delivered {
        /// The delivered identifier.
        event_id: String,
        /// Upstream response body.
        upstream: Value,
    },
    /// The upstream answered non-2xx after the retry policy.
    Rejected {
        /// The rejected identifier.
        event_id: String,
        /// Final upstream status.
        status: u16,
        /// Upstream response body.
        upstream: Value,
    },
    /// No HTTP response was received from the upstream.
    DeliveryFailed {
        /// The identifier whose delivery failed.
        event_id: String,
        /// The transport failure.
        error: TransportError,
    },
}

/// Sequences normalization, idempotency, delivery, health tracking and
/// auditing for each incoming event.
///
/// All collaborators are injected at construction; the pipeline keeps no
/// mutable state of its own between requests.
pub struct EventPipeline {
    clock: Arc<dyn Clock + Send + Sync>,
    integrations: Arc<dyn IntegrationRepository>,
    ledger: Arc<dyn IdempotencyLedger>,
    delivery: DeliveryClient,
    audit_log: Arc<dyn AuditLog>,
}

impl EventPipeline {
    /// Creates a pipeline from its collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        integrations: Arc<dyn IntegrationRepository>,
        ledger: Arc<dyn IdempotencyLedger>,
        delivery: DeliveryClient,
        audit_log: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            clock,
            integrations,
            ledger,
            delivery,
            audit_log,
        }
    }

    /// Runs one event through the pipeline.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if the event cannot be normalized.
    /// - `DomainError::NotConnected` if the tenant's integration is missing,
    ///   not connected, or has no credential.
    /// - `DomainError::Ledger` if the idempotency claim cannot be resolved.
    /// - `DomainError::Infrastructure` if the integration cannot be loaded.
    ///
    /// None of these have side effects beyond the skip audit entry.
    #[instrument(
        skip(self, command),
        fields(
            tenant_id = %command.tenant_id,
            correlation_id = %command.correlation_id,
            command_type = command.command_type(),
        )
    )]
    pub async fn handle(&self, command: &TrackEvent) -> Result<PipelineOutcome, DomainError> {
        let tenant_id = command.tenant_id;
        let event = normalize(&command.body, self.clock.as_ref())?;
        let payload = event.to_payload();
        let redacted_request = redact(&payload);

        if event.skipped_missing_identity {
            info!(event_name = %event.event_name, "skipping event without contact identity");
            self.audit(
                tenant_id,
                &event,
                AUDIT_STATUS_SKIPPED,
                redacted_request,
                json!({ "skipped": true, "reason": SKIPPED_MISSING_IDENTITY }),
            )
            .await;
            return Ok(PipelineOutcome::Skipped {
                event_id: event.event_id,
            });
        }

        let mut record = self
            .integrations
            .find_by_tenant(tenant_id)
            .await?
            .ok_or(DomainError::NotConnected(tenant_id))?;
        let credential = record
            .usable_credential()
            .ok_or(DomainError::NotConnected(tenant_id))?
            .to_owned();

        let claim = self
            .ledger
            .claim(tenant_id, &event.event_id, &event.event_name)
            .await?;
        if claim == Claim::AlreadyClaimed {
            info!(event_id = %event.event_id, "duplicate event identifier, not delivering");
            self.audit(
                tenant_id,
                &event,
                AUDIT_STATUS_DEDUPED,
                redacted_request,
                json!({ "deduped": true, "eventID": event.event_id }),
            )
            .await;
            return Ok(PipelineOutcome::Deduped {
                event_id: event.event_id,
            });
        }

        let outcome = match self.delivery.send(&credential, &payload).await {
            Err(transport_error) => {
                error!(
                    error = %transport_error,
                    event_id = %event.event_id,
                    "upstream delivery failed"
                );
                record.record_failure(transport_error.to_string(), self.clock.now());
                self.save_health(&record).await;
                self.audit(
                    tenant_id,
                    &event,
                    AUDIT_STATUS_TRANSPORT_FAILURE,
                    redacted_request,
                    json!({ "error": transport_error.to_string() }),
                )
                .await;
                return Ok(PipelineOutcome::DeliveryFailed {
                    event_id: event.event_id,
                    error: transport_error,
                });
            }
            Ok(response) if response.is_success() => {
                info!(status = response.status, event_id = %event.event_id, "event delivered");
                record.record_success(self.clock.now());
                response
            }
            Ok(response) if response.is_auth_rejection() => {
                warn!(
                    status = response.status,
                    "upstream rejected credential, marking integration errored"
                );
                record.record_auth_rejection(self.clock.now());
                response
            }
            Ok(response) => {
                warn!(
                    status = response.status,
                    event_id = %event.event_id,
                    "upstream rejected event"
                );
                record.record_failure(format!("HTTP {}", response.status), self.clock.now());
                response
            }
        };

        self.save_health(&record).await;
        self.audit(
            tenant_id,
            &event,
            outcome.status,
            redacted_request,
            redact(&outcome.body),
        )
        .await;

        if outcome.is_success() {
            Ok(PipelineOutcome::Delivered {
                event_id: event.event_id,
                upstream: outcome.body,
            })
        } else {
            Ok(PipelineOutcome::Rejected {
                event_id: event.event_id,
                status: outcome.status,
                upstream: outcome.body,
            })
        }
    }

    /// Best-effort: a failed health update is logged, never surfaced.
    async fn save_health(&self, record: &IntegrationRecord) {
        if let Err(err) = self.integrations.save_health(record).await {
            error!(
                error = %err,
                tenant_id = %record.tenant_id,
                "failed to update integration health"
            );
        }
    }

    /// Best-effort: a failed audit write is logged, never surfaced.
    async fn audit(
        &self,
        tenant_id: Uuid,
        event: &NormalizedEvent,
        status_code: u16,
        request: Value,
        response: Value,
    ) {
        let entry = AuditEntry::outbound_event(
            tenant_id,
            event.event_name.clone(),
            Some(status_code),
            request,
            response,
        );
        if let Err(err) = self.audit_log.append(&entry).await {
            warn!(error = %err, "failed to write audit log entry");
        }
    }
}
