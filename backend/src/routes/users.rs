//! User record API routes

use crate::auth::{auth_middleware, AuthUser};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    middleware,
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use video_api_shared::types::{MessageResponse, UpdateUserRequest, UserView};

/// Create user routes (all gated)
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// GET /api/v1/users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    let users = UserService::list(state.users()).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/:id
async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<UserView>> {
    let Path(id) = id?;
    let user = UserService::get(state.users(), id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/:id - Update own name/email
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserView>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let user = UserService::update(state.users(), &auth, id, req).await?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/:id - Delete own record
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    UserService::delete(state.users(), &auth, id).await?;
    Ok(Json(MessageResponse::new(format!("User deleted with ID: {}", id))))
}
