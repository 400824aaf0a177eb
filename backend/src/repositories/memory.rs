//! In-memory store for development and tests
//!
//! Mirrors the PostgreSQL schema's constraints: unique emails, and videos
//! that must reference an existing owner and are removed with it. All
//! mutations happen under one write lock, so uniqueness holds under
//! concurrent registrations.

use super::{
    NewUser, NewVideo, StoreError, UserChanges, UserRecord, UserStore, VideoRecord, VideoStore,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRecord>,
    videos: HashMap<Uuid, VideoRecord>,
}

/// Volatile store implementing both `UserStore` and `VideoStore`
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut users: Vec<UserRecord> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(users)
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(email) = &changes.email {
            if tables.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = Some(name);
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.videos.retain(|_, v| v.owner_id != id);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl VideoStore for InMemoryStore {
    async fn create_video(&self, video: NewVideo) -> Result<VideoRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&video.owner_id) {
            return Err(StoreError::MissingOwner);
        }

        let record = VideoRecord {
            id: Uuid::new_v4(),
            owner_id: video.owner_id,
            title: video.title,
            url: video.url,
            created_at: Utc::now(),
        };
        tables.videos.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_videos_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut videos: Vec<VideoRecord> = tables
            .videos
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(videos)
    }

    async fn find_video(&self, id: Uuid) -> Result<Option<VideoRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.videos.get(&id).cloned())
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.videos.remove(&id).is_some())
    }
}
