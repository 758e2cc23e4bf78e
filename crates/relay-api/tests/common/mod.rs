//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use relay_core::clock::Clock;
use relay_core::rng::DeterministicRng;
use relay_pipeline::application::delivery::DeliveryClient;
use relay_pipeline::application::pipeline::EventPipeline;
use relay_store::pg_audit_log::PgAuditLog;
use relay_store::pg_integration_repository::PgIntegrationRepository;
use relay_store::pg_ledger::PgIdempotencyLedger;
use relay_test_support::{FixedClock, MockRng};
use relay_upstream::http_transport::HttpTransport;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use relay_api::state::AppState;

/// 2026-01-15T10:00:00Z, shared by all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock::default())
}

/// Build the full app with the Postgres adapters and a real HTTP transport
/// pointed at `upstream_base_url`.
pub fn build_test_app(pool: PgPool, upstream_base_url: &str) -> Router {
    let clock = fixed_clock();
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let transport = HttpTransport::new(upstream_base_url, Duration::from_secs(2)).unwrap();
    let integrations = Arc::new(PgIntegrationRepository::new(pool.clone()));
    let pipeline = EventPipeline::new(
        clock.clone(),
        integrations.clone(),
        Arc::new(PgIdempotencyLedger::new(pool.clone())),
        DeliveryClient::new(Arc::new(transport), clock, rng),
        Arc::new(PgAuditLog::new(pool)),
    );

    relay_api::app(AppState::new(Arc::new(pipeline), integrations))
}

/// Insert an integration row for a tenant.
pub async fn insert_integration(
    pool: &PgPool,
    tenant_id: Uuid,
    status: &str,
    credential: Option<&str>,
) {
    sqlx::query("INSERT INTO integrations (tenant_id, status, credential) VALUES ($1, $2, $3)")
        .bind(tenant_id)
        .bind(status)
        .bind(credential)
        .execute(pool)
        .await
        .unwrap();
}

/// Send a POST request as a verified tenant and return the response.
pub async fn post_json_as(
    app: Router,
    tenant_id: Uuid,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-tenant-id", tenant_id.to_string())
        .header("x-origin-allowed", "true")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request as a verified tenant and return the response.
pub async fn get_json_as(
    app: Router,
    tenant_id: Uuid,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-tenant-id", tenant_id.to_string())
        .header("x-origin-allowed", "true")
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request without identity headers and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
