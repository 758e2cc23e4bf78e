//! Storefront event relay API server entry point.

use std::sync::{Arc, Mutex};

use relay_api::config::AppConfig;
use relay_api::error::AppError;
use relay_api::state::AppState;
use relay_core::clock::{Clock, SystemClock};
use relay_core::rng::{DeterministicRng, SystemRng};
use relay_pipeline::application::delivery::DeliveryClient;
use relay_pipeline::application::pipeline::EventPipeline;
use relay_store::pg_audit_log::PgAuditLog;
use relay_store::pg_integration_repository::PgIntegrationRepository;
use relay_store::pg_ledger::PgIdempotencyLedger;
use relay_upstream::http_transport::HttpTransport;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    let tracer_provider = relay_api::telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting storefront event relay API server");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Wire the pipeline. Every collaborator is owned here, not in globals.
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::new()));
    let transport = HttpTransport::new(&config.upstream_base_url, config.upstream_timeout)
        .map_err(|e| AppError::Config(e.to_string()))?;
    tracing::info!(url = transport.events_url(), "upstream events endpoint");

    let integrations = Arc::new(PgIntegrationRepository::new(pool.clone()));
    let pipeline = EventPipeline::new(
        clock.clone(),
        integrations.clone(),
        Arc::new(PgIdempotencyLedger::new(pool.clone())),
        DeliveryClient::new(Arc::new(transport), clock, rng),
        Arc::new(PgAuditLog::new(pool)),
    );
    let app = relay_api::app(AppState::new(Arc::new(pipeline), integrations));

    // Start server.
    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            eprintln!("failed to flush traces: {e}");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
