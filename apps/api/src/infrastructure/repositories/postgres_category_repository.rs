use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{insert_error, query_error};
use crate::domain::category::Category;
use crate::domain::repositories::{CategoryRepository, RepositoryError, RepositoryResult};
use crate::domain::user::UserId;

/// PostgreSQL implementation of CategoryRepository
///
/// The primary key on `category_id` is the uniqueness guard for inserts.
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new PostgresCategoryRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: String,
    category_name: String,
    category_description: String,
    category_created_by: String,
    category_creation_date: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(r: CategoryRow) -> Result<Self, Self::Error> {
        let created_by = UserId::new(r.category_created_by).map_err(|e| {
            RepositoryError::Database(format!("Invalid category owner from database: {}", e))
        })?;
        Ok(Category {
            category_id: r.category_id,
            category_name: r.category_name,
            category_description: r.category_description,
            category_created_by: created_by,
            category_creation_date: r.category_creation_date,
        })
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: &Category) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                category_id, category_name, category_description,
                category_created_by, category_creation_date
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&category.category_id)
        .bind(&category.category_name)
        .bind(&category.category_description)
        .bind(category.category_created_by.as_str())
        .bind(category.category_creation_date)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, format!("category {}", category.category_id)))?;

        Ok(())
    }

    async fn find_by_id(&self, category_id: &str) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                category_id, category_name, category_description,
                category_created_by, category_creation_date
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error(e, "find category by id"))?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_creator(&self, user_id: &UserId) -> RepositoryResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                category_id, category_name, category_description,
                category_created_by, category_creation_date
            FROM categories
            WHERE category_created_by = $1
            ORDER BY category_creation_date DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error(e, "find categories by creator"))?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn update(&self, category: &Category) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET category_name = $2, category_description = $3
            WHERE category_id = $1
            "#,
        )
        .bind(&category.category_id)
        .bind(&category.category_name)
        .bind(&category.category_description)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error(e, "update category"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, category_id: &str) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(e, "delete category"))?;

        Ok(result.rows_affected() > 0)
    }
}
