use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::note::NoteOwner;
use crate::domain::user::UserId;

/// Repository trait for per-user note buckets
///
/// Buckets are whole documents; there is no per-note storage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new bucket at `NoteOwner::INITIAL_VERSION`
    ///
    /// Fails with `RepositoryError::Duplicate` if the user already has one.
    async fn insert(&self, owner: &NoteOwner) -> RepositoryResult<()>;

    /// Find a user's bucket
    async fn find_by_user(&self, user_id: &UserId) -> RepositoryResult<Option<NoteOwner>>;

    /// Overwrite a bucket's notes if the stored version still equals
    /// `owner.version()`
    ///
    /// Returns the new version. Fails with `RepositoryError::VersionConflict`
    /// if the bucket changed or disappeared since it was read.
    async fn save(&self, owner: &NoteOwner) -> RepositoryResult<i64>;

    /// Delete a user's whole bucket, returning false if none existed
    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool>;
}
