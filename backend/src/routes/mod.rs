//! Route definitions for the Video API
//!
//! This module organizes all API routes and applies middleware.
//!
//! Protection policy: registration, sign-in, the root banner and health
//! probes are public. Every user and video endpoint, and `/auth/me`, sits
//! behind the authorization gate.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use video_api_shared::types::WelcomeResponse;

mod auth;
mod health;
mod users;
mod videos;


pub use auth::auth_routes;
pub use users::user_routes;
pub use videos::video_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(&state))
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

/// API v1 routes
fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes(state.clone()))
        .nest("/users", users::user_routes(state.clone()))
        .nest("/videos", videos::video_routes(state.clone()))
}

/// GET / - Service banner
async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the API".to_string(),
        status: "running".to_string(),
    })
}
