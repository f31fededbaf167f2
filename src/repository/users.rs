//! Users repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{AccessLevel, User},
};

use super::conflict_on_unique;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new user with an application-generated id
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        access_level: AccessLevel,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, access_level)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, joined_at, access_level
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(access_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "user with this email already exists"))?;

        Ok(user)
    }

    /// Get user by email (primary authentication lookup)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, joined_at, access_level FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

}
