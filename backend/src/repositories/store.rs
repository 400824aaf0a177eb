//! Storage abstractions
//!
//! Services receive stores as injected trait objects, so the same logic runs
//! against PostgreSQL in production and the in-memory store in tests.

use super::{UserRecord, VideoRecord};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Storage failure
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email is already registered")]
    DuplicateEmail,

    #[error("owning user does not exist")]
    MissingOwner,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Input for creating a user
#[derive(Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Fields a user may change; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Input for creating a video
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub owner_id: Uuid,
    pub title: String,
    pub url: String,
}

/// Credential and user record store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// All users, oldest first
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Apply changes; `Ok(None)` if the user does not exist
    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Remove a user and their videos; `Ok(false)` if nothing was removed
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Video record store
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert a video; fails with `MissingOwner` if the owner is gone
    async fn create_video(&self, video: NewVideo) -> Result<VideoRecord, StoreError>;

    /// Videos owned by `owner_id`, oldest first
    async fn list_videos_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoRecord>, StoreError>;

    async fn find_video(&self, id: Uuid) -> Result<Option<VideoRecord>, StoreError>;

    async fn delete_video(&self, id: Uuid) -> Result<bool, StoreError>;
}
