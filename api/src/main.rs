//! Canopy compliance API server
//!
//! EUDR compliance-pack pipeline: boundary risk assessment, pack assembly,
//! approval workflow, and document export.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresAssessmentRepository, PostgresDocumentRepository, PostgresPackRepository,
    PostgresProducerRepository,
};
use app::{ExportService, PackService, RiskService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub risk_service:
        Arc<RiskService<PostgresProducerRepository, PostgresAssessmentRepository>>,
    pub pack_service: Arc<
        PackService<
            PostgresProducerRepository,
            PostgresAssessmentRepository,
            PostgresPackRepository,
            PostgresDocumentRepository,
        >,
    >,
    pub export_service: Arc<
        ExportService<
            PostgresProducerRepository,
            PostgresAssessmentRepository,
            PostgresPackRepository,
            PostgresDocumentRepository,
        >,
    >,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,canopy_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Canopy compliance API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let producer_repo = Arc::new(PostgresProducerRepository::new(db.clone()));
    let assessment_repo = Arc::new(PostgresAssessmentRepository::new(db.clone()));
    let pack_repo = Arc::new(PostgresPackRepository::new(db.clone()));
    let document_repo = Arc::new(PostgresDocumentRepository::new(db.clone()));

    // Create application services
    let risk_service = Arc::new(RiskService::new(
        producer_repo.clone(),
        assessment_repo.clone(),
    ));

    let pack_service = Arc::new(PackService::new(
        producer_repo.clone(),
        assessment_repo.clone(),
        pack_repo.clone(),
        document_repo.clone(),
        config.retention_years,
    ));

    let export_service = Arc::new(ExportService::new(
        producer_repo,
        assessment_repo,
        pack_repo,
        document_repo,
    ));

    // Create app state
    let state = AppState {
        risk_service,
        pack_service,
        export_service,
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Boundary submission
        .route(
            "/producers/:id/boundary",
            post(handlers::submit_boundary),
        )
        // Readiness listing
        .route("/eudr/producers-ready", get(handlers::list_ready_producers))
        // Pack generation and queues
        .route(
            "/eudr/packs/:producer_id/generate",
            post(handlers::generate_pack),
        )
        .route("/eudr/packs", get(handlers::list_packs))
        .route("/eudr/packs/pending", get(handlers::list_pending_packs))
        .route("/eudr/packs/approved", get(handlers::list_approved_packs))
        .route(
            "/eudr/packs/:pack_id",
            get(handlers::get_pack).delete(handlers::delete_pack),
        )
        // Approval workflow
        .route("/eudr/packs/:pack_id/decision", post(handlers::decide_pack))
        .route("/eudr/packs/:pack_id/publish", post(handlers::publish_pack))
        // Document download and verification
        .route(
            "/eudr/documents/:document_id/download",
            get(handlers::download_document),
        )
        .route(
            "/eudr/documents/verify/:reference",
            get(handlers::verify_reference),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
