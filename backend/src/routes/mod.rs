//! Route definitions for the AgroLens risk service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Risk assessments
        .route("/assessments", post(handlers::create_assessment))
}
