use thiserror::Error;

/// Business rule violations raised by domain entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Note {note_id} already exists for user {user_id}")]
    DuplicateNote { user_id: String, note_id: i32 },

    #[error("{0}")]
    Validation(String),
}

impl From<String> for DomainError {
    fn from(message: String) -> Self {
        DomainError::Validation(message)
    }
}
