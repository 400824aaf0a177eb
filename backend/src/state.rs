//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys are derived once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling
//! 4. **Injected stores**: No global record lists; stores are trait objects

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{InMemoryStore, UserStore, VideoStore};
use crate::services::CredentialManager;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User and credential store
    pub users: Arc<dyn UserStore>,
    /// Video store
    pub videos: Arc<dyn VideoStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Registration and sign-in over `users`
    pub credentials: CredentialManager,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the signing keys from the configured secret; call once at
    /// startup.
    pub fn new(users: Arc<dyn UserStore>, videos: Arc<dyn VideoStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(config.jwt.secret.expose_secret());
        let credentials = CredentialManager::new(Arc::clone(&users), jwt.clone());

        Self {
            users,
            videos,
            config: Arc::new(config),
            jwt,
            credentials,
        }
    }

    /// Create state where one store serves both users and videos
    pub fn with_store<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: UserStore + VideoStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        let videos: Arc<dyn VideoStore> = store;
        Self::new(users, videos, config)
    }

    /// Create state backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// Get the user store
    #[inline]
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Get the video store
    #[inline]
    pub fn videos(&self) -> &dyn VideoStore {
        self.videos.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get the credential manager
    #[inline]
    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_state_clone_is_cheap() {
        let state = AppState::in_memory(AppConfig::default());

        // Clone should be O(1) - just Arc increments
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }

    #[test]
    fn test_jwt_service_uses_configured_secret() {
        let state = AppState::in_memory(AppConfig::default());
        let reference = JwtService::new(AppConfig::default().jwt.secret.expose_secret());

        let token = state.jwt().issue_token(Uuid::new_v4(), "a@x.com").unwrap();
        assert!(reference.verify_token(&token).is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_stores_ready() {
        let state = AppState::in_memory(AppConfig::default());
        assert!(state.users().ping().await.is_ok());
        assert!(state.videos().list_videos_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
