use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::user::{User, UserId};

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    ///
    /// Fails with `RepositoryError::Duplicate` if the id is taken.
    async fn insert(&self, user: &User) -> RepositoryResult<()>;

    /// Find a user by id
    async fn find_by_id(&self, user_id: &UserId) -> RepositoryResult<Option<User>>;

    /// Overwrite the editable fields of an existing user
    ///
    /// Returns false if no user has that id; never inserts.
    async fn update(&self, user: &User) -> RepositoryResult<bool>;

    /// Delete a user, returning false if nothing was deleted
    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool>;
}
