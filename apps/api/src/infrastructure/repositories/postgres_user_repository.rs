use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{insert_error, query_error};
use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{User, UserId};

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: String,
    user_name: String,
    password_hash: String,
    user_mobile: Option<String>,
    user_added_date: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(r.user_id)
            .map_err(|e| RepositoryError::Database(format!("Invalid user id from database: {}", e)))?;
        Ok(User {
            user_id,
            user_name: r.user_name,
            password_hash: r.password_hash,
            user_mobile: r.user_mobile,
            user_added_date: r.user_added_date,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, user_name, password_hash, user_mobile, user_added_date
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.user_name)
        .bind(&user.password_hash)
        .bind(&user.user_mobile)
        .bind(user.user_added_date)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, format!("user {}", user.user_id)))?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, password_hash, user_mobile, user_added_date
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error(e, "find user by id"))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = $2, password_hash = $3, user_mobile = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_str())
        .bind(&user.user_name)
        .bind(&user.password_hash)
        .bind(&user.user_mobile)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error(e, "update user"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(e, "delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
