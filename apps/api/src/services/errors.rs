use thiserror::Error;

use crate::domain::repositories::RepositoryError;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Errors surfaced by the service layer
///
/// Store faults stay distinct (`Store`) instead of collapsing into
/// `NotFound`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NotCreated(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Concurrent modification detected by a conditional save
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Store failure: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Duplicate(key) => {
                ServiceError::AlreadyExists(format!("{} already exists", key))
            }
            e @ RepositoryError::VersionConflict { .. } => ServiceError::Conflict(e.to_string()),
            RepositoryError::Database(message) => ServiceError::Store(message),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(error: DomainError) -> Self {
        match error {
            e @ DomainError::DuplicateNote { .. } => ServiceError::AlreadyExists(e.to_string()),
            DomainError::Validation(message) => ServiceError::Validation(message),
        }
    }
}

/// Rejects callers acting on another user's resources
pub fn ensure_owner(caller: &UserId, owner: &UserId) -> ServiceResult<()> {
    if caller != owner {
        return Err(ServiceError::Forbidden(format!(
            "User {} may not access resources of {}",
            caller, owner
        )));
    }
    Ok(())
}

/// Parses a raw identity from a path or body into a `UserId`
pub fn parse_user_id(raw: &str) -> ServiceResult<UserId> {
    UserId::new(raw).map_err(ServiceError::Validation)
}
