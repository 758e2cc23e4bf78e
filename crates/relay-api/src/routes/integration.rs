//! Integration health for the calling tenant.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::instrument;

use relay_pipeline::application::query_handlers::{self, IntegrationStatusView};

use crate::error::ApiError;
use crate::identity::VerifiedTenant;
use crate::state::AppState;

/// GET /
#[instrument(skip(state), fields(tenant_id = %tenant_id))]
async fn get_integration(
    State(state): State<AppState>,
    VerifiedTenant(tenant_id): VerifiedTenant,
) -> Result<Json<IntegrationStatusView>, ApiError> {
    let view = query_handlers::get_integration_status(tenant_id, &*state.integrations).await?;
    Ok(Json(view))
}

/// Returns the integration router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_integration))
}
