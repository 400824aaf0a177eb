//! Video record management
//!
//! Videos are private to their owner: other users get 404, not 403, so
//! record ids of other users are not confirmed to exist.

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{NewVideo, VideoRecord, VideoStore};
use tracing::info;
use uuid::Uuid;
use video_api_shared::types::{CreateVideoRequest, VideoView};
use video_api_shared::validation::{validate_video_title, validate_video_url};

pub struct VideoService;

impl VideoService {
    /// Create a video owned by the caller
    pub async fn create(
        store: &dyn VideoStore,
        owner: &AuthUser,
        req: CreateVideoRequest,
    ) -> Result<VideoView, ApiError> {
        let (title, url) = match (req.title, req.url) {
            (Some(title), Some(url)) if !title.is_empty() && !url.is_empty() => (title, url),
            _ => {
                return Err(ApiError::Validation(
                    "Title and URL are required".to_string(),
                ))
            }
        };
        validate_video_title(&title).map_err(ApiError::Validation)?;
        validate_video_url(&url).map_err(ApiError::Validation)?;

        let video = store
            .create_video(NewVideo {
                owner_id: owner.user_id,
                title: title.trim().to_string(),
                url,
            })
            .await?;

        info!(video_id = %video.id, owner_id = %video.owner_id, "Video created");
        Ok(video.into())
    }

    /// List the caller's videos
    pub async fn list(store: &dyn VideoStore, owner: &AuthUser) -> Result<Vec<VideoView>, ApiError> {
        let videos = store.list_videos_by_owner(owner.user_id).await?;
        Ok(videos.into_iter().map(VideoView::from).collect())
    }

    /// Get one of the caller's videos
    pub async fn get(
        store: &dyn VideoStore,
        owner: &AuthUser,
        id: Uuid,
    ) -> Result<VideoView, ApiError> {
        Ok(find_owned(store, owner, id).await?.into())
    }

    /// Delete one of the caller's videos
    pub async fn delete(store: &dyn VideoStore, owner: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        let video = find_owned(store, owner, id).await?;
        if !store.delete_video(video.id).await? {
            return Err(not_found());
        }

        info!(video_id = %id, owner_id = %owner.user_id, "Video deleted");
        Ok(())
    }
}

async fn find_owned(
    store: &dyn VideoStore,
    owner: &AuthUser,
    id: Uuid,
) -> Result<VideoRecord, ApiError> {
    store
        .find_video(id)
        .await?
        .filter(|v| v.owner_id == owner.user_id)
        .ok_or_else(not_found)
}

fn not_found() -> ApiError {
    ApiError::NotFound("Video not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryStore, NewUser, UserStore};

    async fn seed(store: &InMemoryStore, email: &str) -> AuthUser {
        let user = store
            .create_user(NewUser {
                name: None,
                email: email.to_string(),
                password_hash: "$2b$10$placeholder".to_string(),
            })
            .await
            .unwrap();
        AuthUser {
            user_id: user.id,
            email: user.email,
        }
    }

    fn video_req(title: &str, url: &str) -> CreateVideoRequest {
        CreateVideoRequest {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_sets_owner() {
        let store = InMemoryStore::new();
        let me = seed(&store, "a@x.com").await;

        let video = VideoService::create(&store, &me, video_req("Intro", "https://example.com/intro"))
            .await
            .unwrap();
        assert_eq!(video.owner_id, me.user_id);
        assert_eq!(video.title, "Intro");
    }

    #[tokio::test]
    async fn test_create_requires_title_and_url() {
        let store = InMemoryStore::new();
        let me = seed(&store, "a@x.com").await;

        let req = CreateVideoRequest {
            title: Some("Intro".to_string()),
            url: None,
        };
        let result = VideoService::create(&store, &me, req).await;
        assert!(matches!(result, Err(ApiError::Validation(ref m)) if m == "Title and URL are required"));
    }

    #[tokio::test]
    async fn test_other_users_video_is_not_found() {
        let store = InMemoryStore::new();
        let me = seed(&store, "a@x.com").await;
        let other = seed(&store, "b@x.com").await;

        let video = VideoService::create(&store, &me, video_req("Intro", "https://example.com/intro"))
            .await
            .unwrap();

        let result = VideoService::get(&store, &other, video.id).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        let result = VideoService::delete(&store, &other, video.id).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        // Still there for the owner
        assert!(VideoService::get(&store, &me, video.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_for_deleted_owner_is_not_found() {
        let store = InMemoryStore::new();
        let me = seed(&store, "a@x.com").await;
        store.delete_user(me.user_id).await.unwrap();

        let result =
            VideoService::create(&store, &me, video_req("Intro", "https://example.com/intro")).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
