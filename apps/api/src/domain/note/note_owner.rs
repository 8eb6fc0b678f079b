use super::note::Note;
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;

/// Per-user note bucket
///
/// Notes exist only inside their owner's bucket. The bucket is persisted
/// as one document, so every single-note mutation is a read-modify-write
/// of the whole collection guarded by `version`.
///
/// # Invariants
/// - `note_id` is unique within `notes`
/// - Every note's `note_created_by` equals `user_id`
/// - `version` is the store version this bucket was read at
///
/// # Example
/// ```
/// use keepnote_api::domain::note::{Note, NoteOwner};
/// use keepnote_api::domain::user::UserId;
///
/// let owner = UserId::new("alice").unwrap();
/// let note = Note::new(1, "Groceries", "milk", None, None, owner.clone()).unwrap();
/// let mut bucket = NoteOwner::new(owner.clone(), note).expect("valid bucket");
///
/// let second = Note::new(2, "Chores", "laundry", None, None, owner).unwrap();
/// bucket.add(second).expect("unique id");
/// assert_eq!(bucket.notes().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NoteOwner {
    user_id: UserId,
    notes: Vec<Note>,
    version: i64,
}

impl NoteOwner {
    /// Version assigned to a bucket on first insert
    pub const INITIAL_VERSION: i64 = 1;

    /// Creates a bucket holding its owner's first note
    pub fn new(user_id: UserId, first: Note) -> Result<Self, DomainError> {
        let mut owner = Self {
            user_id,
            notes: Vec::new(),
            version: Self::INITIAL_VERSION,
        };
        owner.add(first)?;
        Ok(owner)
    }

    /// Reconstructs a bucket from persisted data
    ///
    /// # Note
    /// Only to be used by repository implementations.
    pub fn from_persistence(user_id: UserId, notes: Vec<Note>, version: i64) -> Self {
        Self {
            user_id,
            notes,
            version,
        }
    }

    /// Appends a note
    ///
    /// # Errors
    /// - `DuplicateNote` if the bucket already holds a note with the same id
    /// - `Validation` if the note belongs to another user
    pub fn add(&mut self, note: Note) -> Result<(), DomainError> {
        self.check_owner(&note)?;
        if self.find(note.note_id).is_some() {
            return Err(DomainError::DuplicateNote {
                user_id: self.user_id.to_string(),
                note_id: note.note_id,
            });
        }
        self.notes.push(note);
        Ok(())
    }

    /// Removes the note with `note_id`, returning it if present
    pub fn remove(&mut self, note_id: i32) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.note_id == note_id)?;
        Some(self.notes.remove(index))
    }

    /// Drops any note with `note_id` and appends `note` under that id
    ///
    /// The replacement always takes `note_id` as its identity and the
    /// bucket owner as its creator, which keeps ids unique even when the
    /// caller supplies a different id in the body.
    pub fn replace(&mut self, note_id: i32, mut note: Note) -> &Note {
        self.remove(note_id);
        note.note_id = note_id;
        note.note_created_by = self.user_id.clone();
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Finds a note by id
    pub fn find(&self, note_id: i32) -> Option<&Note> {
        self.notes.iter().find(|n| n.note_id == note_id)
    }

    fn check_owner(&self, note: &Note) -> Result<(), DomainError> {
        if note.note_created_by != self.user_id {
            return Err(DomainError::Validation(format!(
                "Note {} is created by {}, not {}",
                note.note_id, note.note_created_by, self.user_id
            )));
        }
        Ok(())
    }

    // ===== Getters =====

    /// Returns the owning user's id
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the notes in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns the store version this bucket was read at
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Consumes the bucket, returning its notes
    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}
