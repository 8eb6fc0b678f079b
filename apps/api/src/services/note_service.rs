use std::sync::Arc;

use tracing::instrument;

use super::errors::{ensure_owner, parse_user_id, ServiceError, ServiceResult};
use crate::domain::note::{Note, NoteOwner};
use crate::domain::repositories::{NoteRepository, RepositoryError};
use crate::domain::user::UserId;

/// Note content as supplied by a client
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub note_id: i32,
    pub note_title: String,
    pub note_content: String,
    pub note_status: Option<String>,
    pub category_id: Option<String>,
    /// Defaults to the caller (create) or path user (update) when absent
    pub note_created_by: Option<String>,
}

impl NoteDraft {
    fn into_note(self, owner: UserId) -> ServiceResult<Note> {
        Note::new(
            self.note_id,
            self.note_title,
            self.note_content,
            self.note_status,
            self.category_id,
            owner,
        )
        .map_err(ServiceError::Validation)
    }
}

/// CRUD over notes held in per-user buckets
///
/// Every mutation reads the bucket, changes it in memory and saves it
/// conditionally on the version read; a lost race fails with `Conflict`.
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Adds a note to its owner's bucket, creating the bucket for a first note
    ///
    /// A note id already present in the bucket fails with `AlreadyExists`.
    #[instrument(
        skip(self, draft),
        fields(note_id = draft.note_id),
        err(level = "warn")
    )]
    pub async fn create(&self, caller: &UserId, draft: NoteDraft) -> ServiceResult<Note> {
        let owner = match draft.note_created_by.as_deref() {
            Some(raw) => parse_user_id(raw)?,
            None => caller.clone(),
        };
        ensure_owner(caller, &owner)?;
        let note = draft.into_note(owner.clone())?;

        match self.notes.find_by_user(&owner).await? {
            None => {
                let bucket = NoteOwner::new(owner, note.clone())?;
                self.notes.insert(&bucket).await.map_err(|e| match e {
                    // another request created the bucket since we looked
                    RepositoryError::Duplicate(key) => {
                        ServiceError::Conflict(format!("Concurrent creation of {}", key))
                    }
                    other => other.into(),
                })?;
                tracing::info!("note bucket created");
            }
            Some(mut bucket) => {
                bucket.add(note.clone())?;
                self.save(&bucket).await?;
            }
        }

        tracing::info!("note created");
        Ok(note)
    }

    /// Removes one note; the bucket stays even when it becomes empty
    #[instrument(skip(self), err(level = "warn"))]
    pub async fn delete(&self, caller: &UserId, user_id: &str, note_id: i32) -> ServiceResult<bool> {
        let mut bucket = self.bucket_for(caller, user_id).await?;

        if bucket.remove(note_id).is_none() {
            return Err(note_not_found(bucket.user_id(), note_id));
        }
        self.save(&bucket).await?;

        tracing::info!("note deleted");
        Ok(true)
    }

    /// Removes the user's whole bucket
    #[instrument(skip(self), err(level = "warn"))]
    pub async fn delete_all(&self, caller: &UserId, user_id: &str) -> ServiceResult<bool> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;

        if !self.notes.delete(&user_id).await? {
            return Err(bucket_not_found(&user_id));
        }
        tracing::info!("all notes deleted");
        Ok(true)
    }

    /// Replaces the note with `note_id`, or appends it if the bucket lacks it
    ///
    /// The stored note takes `note_id` and the bucket owner regardless of
    /// the body; the original creation date is kept when replacing.
    #[instrument(skip(self, draft), err(level = "warn"))]
    pub async fn update(
        &self,
        caller: &UserId,
        user_id: &str,
        note_id: i32,
        draft: NoteDraft,
    ) -> ServiceResult<Note> {
        let mut bucket = self.bucket_for(caller, user_id).await?;

        if let Some(raw) = draft.note_created_by.as_deref() {
            if raw != bucket.user_id().as_str() {
                return Err(ServiceError::Validation(format!(
                    "noteCreatedBy {} does not match user {}",
                    raw,
                    bucket.user_id()
                )));
            }
        }

        let mut note = draft.into_note(bucket.user_id().clone())?;
        if let Some(existing) = bucket.find(note_id) {
            note.note_creation_date = existing.note_creation_date;
        }
        let stored = bucket.replace(note_id, note).clone();
        self.save(&bucket).await?;

        tracing::info!("note updated");
        Ok(stored)
    }

    #[instrument(skip(self), err(level = "warn"))]
    pub async fn get_by_note_id_and_user_id(
        &self,
        caller: &UserId,
        user_id: &str,
        note_id: i32,
    ) -> ServiceResult<Note> {
        let bucket = self.bucket_for(caller, user_id).await?;
        bucket
            .find(note_id)
            .cloned()
            .ok_or_else(|| note_not_found(bucket.user_id(), note_id))
    }

    /// Returns the owner's notes in insertion order
    #[instrument(skip(self), err(level = "warn"))]
    pub async fn list_by_user_id(&self, caller: &UserId, user_id: &str) -> ServiceResult<Vec<Note>> {
        Ok(self.bucket_for(caller, user_id).await?.into_notes())
    }

    async fn bucket_for(&self, caller: &UserId, user_id: &str) -> ServiceResult<NoteOwner> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;
        self.notes
            .find_by_user(&user_id)
            .await?
            .ok_or_else(|| bucket_not_found(&user_id))
    }

    async fn save(&self, bucket: &NoteOwner) -> ServiceResult<()> {
        let version = self.notes.save(bucket).await.map_err(|e| {
            if matches!(e, RepositoryError::VersionConflict { .. }) {
                tracing::warn!(user_id = %bucket.user_id(), "note bucket changed concurrently");
            }
            ServiceError::from(e)
        })?;
        tracing::debug!(version, "note bucket saved");
        Ok(())
    }
}

fn bucket_not_found(user_id: &UserId) -> ServiceError {
    ServiceError::NotFound(format!("No notes found for user {}", user_id))
}

fn note_not_found(user_id: &UserId, note_id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Note {} not found for user {}", note_id, user_id))
}
