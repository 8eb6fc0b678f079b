// Repository traits (ports)
// Implemented by infrastructure adapters

pub mod category_repository;
pub mod note_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use note_repository::NoteRepository;
pub use user_repository::UserRepository;

use thiserror::Error;

/// Failures reported by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A record with the same key already exists
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// A conditional save found a newer version in the store
    #[error("Version conflict on {key}: expected version {expected}")]
    VersionConflict { key: String, expected: i64 },

    /// Any other store failure
    #[error("Database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
