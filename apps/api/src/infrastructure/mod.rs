// Infrastructure layer module
// Contains database adapters and store wiring
// Follows Hexagonal Architecture

pub mod repositories;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::repositories::{CategoryRepository, NoteRepository, UserRepository};
use repositories::{
    InMemoryCategoryRepository, InMemoryNoteRepository, InMemoryUserRepository,
    PostgresCategoryRepository, PostgresNoteRepository, PostgresUserRepository,
};

/// The full set of repositories the services run on
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub notes: Arc<dyn NoteRepository>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            notes: Arc::new(PostgresNoteRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            notes: Arc::new(InMemoryNoteRepository::new()),
        }
    }
}

/// Opens a PostgreSQL connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
