//! Authentication routes
//!
//! Provides endpoints for user registration, sign-in, and identity lookup.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::{auth_middleware, AuthUser};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use video_api_shared::types::{
    IdentityResponse, RegisterRequest, RegisterResponse, SignInRequest, TokenResponse,
};

/// Create auth routes
///
/// Only `/me` is gated; `route_layer` covers the routes added before it.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/register", post(register))
        .route("/signin", post(sign_in))
}

/// Register a new user
///
/// POST /api/v1/auth/register
///
/// # Performance
/// Password hashing is offloaded to blocking thread pool.
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload?;
    let user = state.credentials().register(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Sign in with email and password
///
/// POST /api/v1/auth/signin
async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(req) = payload?;
    let token = state.credentials().sign_in(req).await?;
    Ok(Json(TokenResponse { token }))
}

/// Identity carried by the caller's token
///
/// GET /api/v1/auth/me
async fn me(auth: AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        id: auth.user_id,
        email: auth.email,
    })
}
