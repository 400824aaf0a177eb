//! PostgreSQL-backed store

use super::StoreError;
use crate::db;
use sqlx::PgPool;

/// Store backed by a PostgreSQL connection pool
///
/// Implements both `UserStore` (see `user.rs`) and `VideoStore`
/// (see `video.rs`). Cloning is O(1).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(super) async fn health_check(&self) -> Result<(), StoreError> {
        db::health_check(&self.pool).await?;
        Ok(())
    }
}

/// Translate a unique-constraint violation into `DuplicateEmail`
pub(super) fn map_unique_violation(err: sqlx::Error) -> StoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(err),
    }
}

/// Translate a foreign-key violation into `MissingOwner`
pub(super) fn map_foreign_key_violation(err: sqlx::Error) -> StoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => StoreError::MissingOwner,
        _ => StoreError::Database(err),
    }
}
