//! Rutas de la API
//!
//! Composición del router completo; lo comparten el binario y los tests.

pub mod auth_routes;
pub mod booking_routes;
pub mod driver_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/users", user_routes::create_user_router(state.clone()))
        .nest("/drivers", driver_routes::create_driver_router(state.clone()))
        .nest("/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/bookings", booking_routes::create_booking_router(state.clone()));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "ride-hailing-api",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
