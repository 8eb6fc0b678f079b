use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::category::Category;
use crate::domain::user::UserId;

/// Repository trait for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category
    ///
    /// Fails with `RepositoryError::Duplicate` if the id is taken.
    async fn insert(&self, category: &Category) -> RepositoryResult<()>;

    /// Find a category by its id
    async fn find_by_id(&self, category_id: &str) -> RepositoryResult<Option<Category>>;

    /// Find all categories created by a user
    async fn find_by_creator(&self, user_id: &UserId) -> RepositoryResult<Vec<Category>>;

    /// Overwrite name and description of an existing category
    ///
    /// Returns false if no category has that id; never inserts.
    async fn update(&self, category: &Category) -> RepositoryResult<bool>;

    /// Delete a category, returning false if nothing was deleted
    async fn delete(&self, category_id: &str) -> RepositoryResult<bool>;
}
