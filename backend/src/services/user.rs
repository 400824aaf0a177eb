//! User record management

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::{StoreError, UserChanges, UserStore};
use tracing::info;
use uuid::Uuid;
use video_api_shared::types::{UpdateUserRequest, UserView};
use video_api_shared::validation::{validate_email, validate_name};

/// User service for record operations
///
/// Any signed-in user may read user records; only the owner of a record
/// may change or delete it.
pub struct UserService;

impl UserService {
    /// List all users (public projection only)
    pub async fn list(store: &dyn UserStore) -> Result<Vec<UserView>, ApiError> {
        let users = store.list_users().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// Get one user
    pub async fn get(store: &dyn UserStore, id: Uuid) -> Result<UserView, ApiError> {
        store
            .find_user(id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Update the caller's own name and/or email
    pub async fn update(
        store: &dyn UserStore,
        actor: &AuthUser,
        id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserView, ApiError> {
        ensure_self(actor, id)?;

        if req.name.is_none() && req.email.is_none() {
            return Err(ApiError::Validation("Name or email is required".to_string()));
        }
        if let Some(name) = &req.name {
            validate_name(name).map_err(ApiError::Validation)?;
        }
        if let Some(email) = &req.email {
            validate_email(email).map_err(ApiError::Validation)?;
        }

        let changes = UserChanges {
            name: req.name.map(|n| n.trim().to_string()),
            email: req.email,
        };

        let user = store
            .update_user(id, changes)
            .await
            .map_err(|e| match e {
                StoreError::DuplicateEmail => {
                    ApiError::Conflict("Email already in use".to_string())
                }
                other => other.into(),
            })?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user.id, "User updated");
        Ok(user.into())
    }

    /// Delete the caller's own record (and their videos)
    pub async fn delete(store: &dyn UserStore, actor: &AuthUser, id: Uuid) -> Result<(), ApiError> {
        ensure_self(actor, id)?;

        if !store.delete_user(id).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn ensure_self(actor: &AuthUser, id: Uuid) -> Result<(), ApiError> {
    if actor.user_id != id {
        return Err(ApiError::Forbidden("Cannot modify another user".to_string()));
    }
    Ok(())
}
