//! Video API routes

use crate::auth::{auth_middleware, AuthUser};
use crate::error::ApiResult;
use crate::services::VideoService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use video_api_shared::types::{CreateVideoRequest, MessageResponse, VideoCreatedResponse, VideoView};

/// Create video routes (all gated)
pub fn video_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_videos).post(create_video))
        .route("/:id", get(get_video).delete(delete_video))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// POST /api/v1/videos - Create a video owned by the caller
async fn create_video(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VideoCreatedResponse>)> {
    let Json(req) = payload?;
    let video = VideoService::create(state.videos(), &auth, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(VideoCreatedResponse {
            message: "Video created successfully".to_string(),
            video,
        }),
    ))
}

/// GET /api/v1/videos - The caller's videos
async fn list_videos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<VideoView>>> {
    let videos = VideoService::list(state.videos(), &auth).await?;
    Ok(Json(videos))
}

/// GET /api/v1/videos/:id
async fn get_video(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<VideoView>> {
    let Path(id) = id?;
    let video = VideoService::get(state.videos(), &auth, id).await?;
    Ok(Json(video))
}

/// DELETE /api/v1/videos/:id
async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    VideoService::delete(state.videos(), &auth, id).await?;
    Ok(Json(MessageResponse::new(format!("Video deleted with ID: {}", id))))
}
