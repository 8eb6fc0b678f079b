use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{insert_error, query_error};
use crate::domain::note::{Note, NoteOwner};
use crate::domain::repositories::{NoteRepository, RepositoryError, RepositoryResult};
use crate::domain::user::UserId;

/// PostgreSQL implementation of NoteRepository
///
/// Each user's notes are one JSONB document. Saves are a single
/// conditional UPDATE on `version`, so two read-modify-write cycles on the
/// same bucket cannot silently overwrite each other.
pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    /// Creates a new PostgresNoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NoteOwnerRow {
    notes: Json<Vec<Note>>,
    version: i64,
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn insert(&self, owner: &NoteOwner) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO note_owners (user_id, notes, version)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(owner.user_id().as_str())
        .bind(Json(owner.notes()))
        .bind(NoteOwner::INITIAL_VERSION)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, format!("note bucket {}", owner.user_id())))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> RepositoryResult<Option<NoteOwner>> {
        let row = sqlx::query_as::<_, NoteOwnerRow>(
            r#"
            SELECT notes, version
            FROM note_owners
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error(e, "find note bucket"))?;

        Ok(row.map(|r| NoteOwner::from_persistence(user_id.clone(), r.notes.0, r.version)))
    }

    async fn save(&self, owner: &NoteOwner) -> RepositoryResult<i64> {
        let version = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE note_owners
            SET notes = $2, version = version + 1
            WHERE user_id = $1 AND version = $3
            RETURNING version
            "#,
        )
        .bind(owner.user_id().as_str())
        .bind(Json(owner.notes()))
        .bind(owner.version())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error(e, "save note bucket"))?;

        version.ok_or_else(|| RepositoryError::VersionConflict {
            key: owner.user_id().to_string(),
            expected: owner.version(),
        })
    }

    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM note_owners WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(e, "delete note bucket"))?;

        Ok(result.rows_affected() > 0)
    }
}
