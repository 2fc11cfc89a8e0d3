//! Route definitions for the ClimbTrack API
//!
//! This module organizes all API routes and applies middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod sessions;
mod upload;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod upload_tests;

pub use auth::auth_routes;
pub use sessions::session_routes;
pub use upload::upload_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let uploads_dir = state.photos().dir().to_path_buf();

    Router::new()
        .nest("/api", api_routes())
        // Static retrieval of uploaded photos
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback(route_not_found)
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/auth", auth::auth_routes())
        .nest("/sessions", sessions::session_routes())
        .nest("/upload", upload::upload_routes())
}

/// Unmatched routes get a JSON 404 rather than an empty body
async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
