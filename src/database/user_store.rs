use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Lookup of API credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// True when a user with exactly this username and password exists
    async fn verify(&self, username: &str, password: &str) -> Result<bool, DatabaseError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    // Plain equality on the stored password; hashing is pending a security review.
    async fn verify(&self, username: &str, password: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND password = $2)",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
