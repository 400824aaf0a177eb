//! Credential manager: registration and sign-in
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service holds pre-computed keys
//! - The user store is injected, so no request touches global state

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserStore};
use std::sync::Arc;
use tracing::{info, warn};
use video_api_shared::types::{RegisterRequest, SignInRequest, UserView};
use video_api_shared::validation::{validate_email, validate_name, validate_password};

const MISSING_CREDENTIALS: &str = "Email and password are required";

/// Registers users and exchanges credentials for bearer tokens
#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn UserStore>,
    jwt: JwtService,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    /// Register a new user and return its public projection
    pub async fn register(&self, req: RegisterRequest) -> Result<UserView, ApiError> {
        let (email, password) = require_credentials(req.email, req.password)?;
        validate_email(&email).map_err(ApiError::Validation)?;
        validate_password(&password).map_err(ApiError::Validation)?;

        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(name) = &name {
            validate_name(name).map_err(ApiError::Validation)?;
        }

        if self.store.find_user_by_email(&email).await?.is_some() {
            warn!(email = %email, reason = "duplicate_email", "Registration rejected");
            return Err(ApiError::Conflict("User already exists".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password).await?;

        // A concurrent registration may still win the race; the store's
        // uniqueness check turns that into the same conflict
        let user = self
            .store
            .create_user(NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user.into())
    }

    /// Verify credentials and issue a one-hour bearer token
    pub async fn sign_in(&self, req: SignInRequest) -> Result<String, ApiError> {
        let (email, password) = require_credentials(req.email, req.password)?;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!(email = %email, reason = "unknown_email", "Sign-in rejected");
            return Err(ApiError::NotFound("User not found".to_string()));
        };

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password, user.password_hash.clone()).await?;
        if !valid {
            warn!(user_id = %user.id, reason = "wrong_password", "Sign-in rejected");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.jwt.issue_token(user.id, &user.email)?;

        info!(user_id = %user.id, "User signed in");
        Ok(token)
    }
}

/// Both fields must be present and non-empty
fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::Validation(MISSING_CREDENTIALS.to_string())),
    }
}
