//! Video repository for database operations

use super::postgres::{map_foreign_key_violation, PgStore};
use super::{NewVideo, StoreError, VideoStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use video_api_shared::types::VideoView;

/// Video record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoView {
    fn from(video: VideoRecord) -> Self {
        VideoView {
            id: video.id,
            title: video.title,
            url: video.url,
            owner_id: video.owner_id,
            created_at: video.created_at,
        }
    }
}

#[async_trait]
impl VideoStore for PgStore {
    async fn create_video(&self, video: NewVideo) -> Result<VideoRecord, StoreError> {
        sqlx::query_as::<_, VideoRecord>(
            r#"
            INSERT INTO videos (owner_id, title, url)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, title, url, created_at
            "#,
        )
        .bind(video.owner_id)
        .bind(video.title)
        .bind(video.url)
        .fetch_one(self.pool())
        .await
        .map_err(map_foreign_key_violation)
    }

    async fn list_videos_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoRecord>, StoreError> {
        let videos = sqlx::query_as::<_, VideoRecord>(
            r#"
            SELECT id, owner_id, title, url, created_at
            FROM videos
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;

        Ok(videos)
    }

    async fn find_video(&self, id: Uuid) -> Result<Option<VideoRecord>, StoreError> {
        let video = sqlx::query_as::<_, VideoRecord>(
            r#"
            SELECT id, owner_id, title, url, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(video)
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
