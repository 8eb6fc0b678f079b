use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Status given to notes created without one
pub const DEFAULT_NOTE_STATUS: &str = "not-started";

/// A single note, stored nested inside its owner's bucket
///
/// `note_id` is unique within the owner's bucket only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub note_id: i32,
    pub note_title: String,
    pub note_content: String,
    pub note_status: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub note_created_by: UserId,
    pub note_creation_date: DateTime<Utc>,
}

impl Note {
    /// Creates a note stamped with the current time
    ///
    /// # Example
    /// ```
    /// use keepnote_api::domain::note::Note;
    /// use keepnote_api::domain::user::UserId;
    ///
    /// let owner = UserId::new("alice").unwrap();
    /// let note = Note::new(1, "Groceries", "milk", None, None, owner).expect("valid note");
    /// assert_eq!(note.note_status, "not-started");
    /// ```
    pub fn new(
        note_id: i32,
        note_title: impl Into<String>,
        note_content: impl Into<String>,
        note_status: Option<String>,
        category_id: Option<String>,
        created_by: UserId,
    ) -> Result<Self, String> {
        let note_title = note_title.into();
        if note_title.trim().is_empty() {
            return Err("Note title cannot be empty".to_string());
        }

        Ok(Self {
            note_id,
            note_title,
            note_content: note_content.into(),
            note_status: note_status.unwrap_or_else(|| DEFAULT_NOTE_STATUS.to_string()),
            category_id,
            note_created_by: created_by,
            note_creation_date: Utc::now(),
        })
    }
}
