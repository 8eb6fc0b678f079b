// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_category_repository;
pub mod postgres_note_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryCategoryRepository, InMemoryNoteRepository, InMemoryUserRepository};
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_note_repository::PostgresNoteRepository;
pub use postgres_user_repository::PostgresUserRepository;

use crate::domain::repositories::RepositoryError;

/// Maps an INSERT failure, turning unique violations into `Duplicate`
pub(crate) fn insert_error(error: sqlx::Error, key: String) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Duplicate(key),
        _ => RepositoryError::Database(format!("Failed to insert {}: {}", key, error)),
    }
}

pub(crate) fn query_error(error: sqlx::Error, action: &str) -> RepositoryError {
    RepositoryError::Database(format!("Failed to {}: {}", action, error))
}
