//! Per-tenant integration record and its repository port.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// `last_error` value recorded when the upstream rejects the credential.
pub const AUTH_ERROR: &str = "AUTH";

/// Connection health of a tenant's integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    /// Configured but switched off by the tenant.
    Disabled,
    /// Healthy; events may be delivered.
    Connected,
    /// The upstream rejected the credential.
    Error,
}

impl IntegrationStatus {
    /// Returns the persisted string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for IntegrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disabled" => Ok(Self::Disabled),
            "connected" => Ok(Self::Connected),
            "error" => Ok(Self::Error),
            other => Err(DomainError::Infrastructure(format!(
                "unknown integration status: {other}"
            ))),
        }
    }
}

/// A tenant's integration with the upstream marketing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationRecord {
    /// Owning tenant.
    pub tenant_id: Uuid,
    /// Current connection health.
    pub status: IntegrationStatus,
    /// Opaque upstream API key.
    pub credential: Option<String>,
    /// Time of the last successful delivery.
    pub last_event_at: Option<DateTime<Utc>>,
    /// Short description of the last failure.
    pub last_error: Option<String>,
    /// Time of the last failure.
    pub last_error_at: Option<DateTime<Utc>>,
}

impl IntegrationRecord {
    /// Returns the credential when the integration may deliver events.
    ///
    /// A record that is not `connected`, or whose credential is missing or
    /// blank, yields `None`.
    #[must_use]
    pub fn usable_credential(&self) -> Option<&str> {
        if self.status != IntegrationStatus::Connected {
            return None;
        }
        self.credential
            .as_deref()
            .filter(|credential| !credential.trim().is_empty())
    }

    /// Records a 2xx delivery. Any earlier failure is cleared with its
    /// timestamp.
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        self.status = IntegrationStatus::Connected;
        self.last_error = None;
        self.last_error_at = None;
        self.last_event_at = Some(now);
    }

    /// Records an upstream 401/403: the integration moves to `error`.
    pub fn record_auth_rejection(&mut self, now: DateTime<Utc>) {
        self.status = IntegrationStatus::Error;
        self.last_error = Some(AUTH_ERROR.to_owned());
        self.last_error_at = Some(now);
    }

    /// Records any other failure. The status is left untouched.
    pub fn record_failure(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.last_error = Some(message.into());
        self.last_error_at = Some(now);
    }
}

/// Repository for reading and updating integration records.
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// Loads the integration for a tenant, if one exists.
    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<IntegrationRecord>, DomainError>;

    /// Persists the health fields (`status`, `last_event_at`, `last_error`,
    /// `last_error_at`) of a record. Last writer wins.
    async fn save_health(&self, record: &IntegrationRecord) -> Result<(), DomainError>;
}
