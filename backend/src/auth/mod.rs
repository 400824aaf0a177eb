//! Authentication module
//!
//! Provides bcrypt password hashing, JWT issuance/verification, and the
//! authorization gate for protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError, TOKEN_TTL_SECS};
pub use middleware::{auth_middleware, authorize, bearer_token, AuthUser, GateRejection};
pub use password::{PasswordError, PasswordService, HASH_COST};
