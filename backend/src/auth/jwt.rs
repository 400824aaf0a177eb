//! JWT token generation and validation
//!
//! Issues HS256 tokens carrying `{sub, email, iat, exp}` with a fixed
//! one-hour lifetime, using pre-computed keys. Verification is stateless:
//! signature and expiry only, no store lookup.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Lifetime of every issued token
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email of the user at sign-in time
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a token could not be issued or accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, foreign secret, tampered or undecodable token
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("identity is missing a required field: {0}")]
    MissingIdentity(&'static str),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::MissingIdentity(_) => "missing_identity",
            TokenError::Signing(_) => "signing",
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Keys and validation rules are built once and shared via `Arc`, so
/// clones are cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against an explicit clock in `verify_token_at`
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
        }
    }

    /// Issue a token for a user, valid for one hour from now
    #[inline]
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_token_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if user_id.is_nil() {
            return Err(TokenError::MissingIdentity("id"));
        }
        if email.is_empty() {
            return Err(TokenError::MissingIdentity("email"));
        }

        let exp = now + Duration::seconds(TOKEN_TTL_SECS);
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token against the current time and return its claims
    #[inline]
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// A token is valid while `now < exp`.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::InvalidSignature,
            })?;

        let claims = token_data.claims;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
