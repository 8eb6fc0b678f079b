// Service layer
// Validation, ownership checks and error translation over the repositories

pub mod auth_service;
pub mod category_service;
pub mod errors;
pub mod note_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthenticatedUser, IssuedToken, TokenSettings};
pub use category_service::{CategoryService, CategoryUpdate, NewCategory};
pub use errors::{ServiceError, ServiceResult};
pub use note_service::{NoteDraft, NoteService};
pub use user_service::{NewUser, UserService, UserUpdate};

use crate::auth::password::{hash_password, verify_password};

// bcrypt is deliberately slow; keep it off the async workers
pub(crate) async fn hash_credential(password: String, cost: u32) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))
}

pub(crate) async fn verify_credential(password: String, hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| ServiceError::Internal(format!("Password verification failed: {}", e)))
}
