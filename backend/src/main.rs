//! AgroLens Risk Service - Backend Server
//!
//! Assesses crop disease risk for a field by fusing weather observations,
//! satellite-derived vegetation indices and agronomic context into a risk
//! score, disease candidates and actionable recommendations.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod model;
mod routes;
mod services;

pub use config::Config;

use external::{SatelliteClient, WeatherClient};
use model::BaselineRiskModel;
use services::{
    AssessmentOrchestrator, FeatureFuser, RecommendationPolicy, RiskInferenceEngine,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AssessmentOrchestrator>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrolens_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting AgroLens Risk Service");
    tracing::info!("Environment: {}", config.environment);

    // Construct all components once and inject them explicitly; there is no
    // ambient global lookup.
    let weather = WeatherClient::new(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
        Duration::from_secs(config.weather.timeout_seconds),
    )?;
    let satellite = SatelliteClient::new(
        config.satellite.api_key.clone(),
        config.satellite.api_endpoint.clone(),
        Duration::from_secs(config.satellite.timeout_seconds),
    )?;

    // Model load failures are fatal at startup, never per-request
    let risk_model = BaselineRiskModel::load()?;
    let engine = RiskInferenceEngine::new(Arc::new(risk_model));
    tracing::info!("Risk model loaded: {}", engine.model_version());

    let orchestrator = AssessmentOrchestrator::new(
        Arc::new(weather),
        Arc::new(satellite),
        FeatureFuser::new(),
        engine,
        RecommendationPolicy::new(),
    );

    // Create application state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgroLens Risk Service API v1.0"
}
