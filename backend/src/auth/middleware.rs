//! Authorization gate
//!
//! Checks the `Authorization: Bearer <token>` header of protected requests.
//! Per request: a missing header is rejected with 401, a malformed header or
//! a token that fails verification with 403, and a valid token admits the
//! request with the decoded identity attached to its extensions.
//!
//! Applied as a `route_layer` over protected routers, and available as the
//! `AuthUser` extractor, which reuses the layer's result when present.

use crate::auth::jwt::{JwtService, TokenError};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Authenticated user extracted from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Why the gate refused a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateRejection {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header is not a bearer credential")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token subject is not a user id")]
    InvalidSubject,
}

impl GateRejection {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            GateRejection::MissingHeader => "missing_header",
            GateRejection::MalformedHeader => "malformed_header",
            GateRejection::Token(err) => err.kind(),
            GateRejection::InvalidSubject => "invalid_subject",
        }
    }
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::MissingHeader => ApiError::Unauthorized("Unauthorized".to_string()),
            _ => ApiError::Forbidden("Invalid token".to_string()),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value
///
/// The scheme is matched case-insensitively; the token must be non-empty.
pub fn bearer_token(value: &HeaderValue) -> Option<&str> {
    let value = value.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Decide whether a request carrying `header` is admitted at time `now`
pub fn authorize(
    jwt: &JwtService,
    header: Option<&HeaderValue>,
    now: DateTime<Utc>,
) -> Result<AuthUser, GateRejection> {
    let header = header.ok_or(GateRejection::MissingHeader)?;
    let token = bearer_token(header).ok_or(GateRejection::MalformedHeader)?;
    let claims = jwt.verify_token_at(token, now)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| GateRejection::InvalidSubject)?;

    Ok(AuthUser {
        user_id,
        email: claims.email,
    })
}

/// Run the gate against the current time and log the outcome
fn admit(state: &AppState, headers: &HeaderMap, path: &str) -> Result<AuthUser, ApiError> {
    match authorize(state.jwt(), headers.get(AUTHORIZATION), Utc::now()) {
        Ok(user) => {
            debug!(user_id = %user.user_id, path, "Request admitted");
            Ok(user)
        }
        Err(GateRejection::MissingHeader) => {
            debug!(path, "Request rejected: no authorization header");
            Err(GateRejection::MissingHeader.into())
        }
        Err(rejection) => {
            warn!(reason = rejection.kind(), path, "Request rejected by authorization gate");
            Err(rejection.into())
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already admitted by `auth_middleware`
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        admit(&app_state, &parts.headers, parts.uri.path())
    }
}

/// Middleware applying the gate to a group of routes
///
/// Use with `axum::middleware::from_fn_with_state` as a `route_layer`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = admit(&state, request.headers(), request.uri().path())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn service() -> JwtService {
        JwtService::new("gate-test-secret")
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let result = authorize(&service(), None, Utc::now());
        assert_eq!(result, Err(GateRejection::MissingHeader));
    }

    #[rstest]
    #[case("")]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Token abc.def.ghi")]
    fn test_malformed_header_is_forbidden(#[case] value: &'static str) {
        let header = HeaderValue::from_static(value);
        let result = authorize(&service(), Some(&header), Utc::now());
        assert_eq!(result, Err(GateRejection::MalformedHeader));

        let error: ApiError = result.unwrap_err().into();
        assert!(matches!(error, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_garbage_bearer_token_is_forbidden() {
        let header = HeaderValue::from_static("Bearer garbage");
        let result = authorize(&service(), Some(&header), Utc::now());
        assert_eq!(
            result,
            Err(GateRejection::Token(TokenError::InvalidSignature))
        );
    }

    #[test]
    fn test_valid_token_admits_identity() {
        let jwt = service();
        let user_id = Uuid::new_v4();
        let token = jwt.issue_token(user_id, "a@x.com").unwrap();
        let header = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();

        let user = authorize(&jwt, Some(&header), Utc::now()).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let jwt = service();
        let token = jwt.issue_token(Uuid::new_v4(), "a@x.com").unwrap();
        let header = HeaderValue::from_str(&format!("bearer {}", token)).unwrap();

        assert!(authorize(&jwt, Some(&header), Utc::now()).is_ok());
    }

    #[test]
    fn test_expired_token_is_forbidden() {
        let jwt = service();
        let issued_at = Utc::now();
        let token = jwt
            .issue_token_at(Uuid::new_v4(), "a@x.com", issued_at)
            .unwrap();
        let header = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();

        let later = issued_at + Duration::hours(1) + Duration::seconds(1);
        let result = authorize(&jwt, Some(&header), later);
        assert_eq!(result, Err(GateRejection::Token(TokenError::Expired)));
        assert_eq!(result.unwrap_err().kind(), "expired");
    }

    #[test]
    fn test_rejection_status_mapping() {
        let missing: ApiError = GateRejection::MissingHeader.into();
        assert!(matches!(missing, ApiError::Unauthorized(_)));

        let expired: ApiError = GateRejection::Token(TokenError::Expired).into();
        assert!(matches!(expired, ApiError::Forbidden(_)));
    }
}
