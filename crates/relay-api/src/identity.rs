//! Caller identity supplied by the fronting identity service.
//!
//! The service verifies the storefront session and origin allowlist before
//! forwarding; this layer only reads its verdict from request headers.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::ErrorBody;

/// Header carrying the verified tenant identifier.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Header carrying the origin allowlist verdict.
pub const ORIGIN_ALLOWED_HEADER: &str = "x-origin-allowed";

/// Why a request was refused before reaching the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRejection {
    /// No valid tenant identity.
    Unauthenticated,
    /// Origin not on the tenant's allowlist.
    OriginNotAllowed,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => ErrorBody::respond(
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "missing or invalid tenant identity",
            ),
            Self::OriginNotAllowed => ErrorBody::respond(
                StatusCode::FORBIDDEN,
                "origin_not_allowed",
                "origin not allowed",
            ),
        }
    }
}

/// A tenant whose session and origin were verified upstream of this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedTenant(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for VerifiedTenant {
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(IdentityRejection::Unauthenticated)?;

        let origin_allowed = parts
            .headers
            .get(ORIGIN_ALLOWED_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        if !origin_allowed {
            return Err(IdentityRejection::OriginNotAllowed);
        }

        Ok(Self(tenant_id))
    }
}
