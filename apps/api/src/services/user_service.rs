use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use super::errors::{ensure_owner, parse_user_id, ServiceError, ServiceResult};
use super::hash_credential;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{validate_password, User, UserId};

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub user_name: String,
    pub password: String,
    pub user_mobile: Option<String>,
}

/// Editable user fields; identity never changes
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub user_mobile: Option<String>,
}

/// CRUD over user records
pub struct UserService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Creates a user
    ///
    /// The store's unique key is the only uniqueness guard; a duplicate
    /// surfaces as `AlreadyExists`.
    #[instrument(
        skip(self, new_user),
        fields(user_id = %new_user.user_id),
        err(level = "warn")
    )]
    pub async fn create(&self, new_user: NewUser) -> ServiceResult<User> {
        let user = build_user(new_user, self.bcrypt_cost).await?;
        insert_user(self.users.as_ref(), &user).await?;
        tracing::info!("user created");
        Ok(user)
    }

    /// Overwrites a user's editable fields and returns the stored record
    #[instrument(skip(self, update), err(level = "warn"))]
    pub async fn update(
        &self,
        caller: &UserId,
        user_id: &str,
        update: UserUpdate,
    ) -> ServiceResult<User> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;

        let mut user = self.require(&user_id).await?;
        if let Some(user_name) = update.user_name {
            user.user_name = user_name;
        }
        if let Some(password) = update.password {
            validate_password(&password).map_err(ServiceError::Validation)?;
            user.password_hash = hash_credential(password, self.bcrypt_cost).await?;
        }
        if update.user_mobile.is_some() {
            user.user_mobile = update.user_mobile;
        }

        if !self.users.update(&user).await? {
            return Err(not_found(&user_id));
        }
        tracing::info!("user updated");
        self.require(&user_id).await
    }

    /// Deletes a user; owned notes and categories are left in place
    #[instrument(skip(self), err(level = "warn"))]
    pub async fn delete(&self, caller: &UserId, user_id: &str) -> ServiceResult<bool> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;

        if !self.users.delete(&user_id).await? {
            return Err(not_found(&user_id));
        }
        tracing::info!("user deleted");
        Ok(true)
    }

    #[instrument(skip(self), err(level = "warn"))]
    pub async fn get_by_id(&self, caller: &UserId, user_id: &str) -> ServiceResult<User> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;
        self.require(&user_id).await
    }

    async fn require(&self, user_id: &UserId) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))
    }
}

fn not_found(user_id: &UserId) -> ServiceError {
    ServiceError::NotFound(format!("User not found: {}", user_id))
}

/// Validates input and hashes the credential
pub(crate) async fn build_user(new_user: NewUser, bcrypt_cost: u32) -> ServiceResult<User> {
    let user_id = parse_user_id(&new_user.user_id)?;
    validate_password(&new_user.password).map_err(ServiceError::Validation)?;

    let user_name = if new_user.user_name.trim().is_empty() {
        user_id.to_string()
    } else {
        new_user.user_name
    };

    Ok(User {
        password_hash: hash_credential(new_user.password, bcrypt_cost).await?,
        user_id,
        user_name,
        user_mobile: new_user.user_mobile,
        user_added_date: Utc::now(),
    })
}

pub(crate) async fn insert_user(users: &dyn UserRepository, user: &User) -> ServiceResult<()> {
    users.insert(user).await.map_err(|e| match e {
        RepositoryError::Duplicate(_) => {
            tracing::warn!(user_id = %user.user_id, "user already exists");
            ServiceError::AlreadyExists(format!("User already exists: {}", user.user_id))
        }
        other => other.into(),
    })
}
