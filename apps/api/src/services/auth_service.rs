use std::sync::Arc;

use tracing::instrument;

use super::errors::{ServiceError, ServiceResult};
use super::user_service::{build_user, insert_user, NewUser};
use super::verify_credential;
use crate::auth::jwt::{create_token, verify_token, Claims};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{User, UserId};

const BEARER_PREFIX: &str = "Bearer ";

/// Signing parameters for issued tokens
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub user_id: UserId,
}

/// Identity established from a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: Claims,
}

/// Registration, login and bearer token verification
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenSettings,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenSettings, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    /// Registers a user; a taken id fails with `AlreadyExists`
    #[instrument(
        skip(self, new_user),
        fields(user_id = %new_user.user_id),
        err(level = "warn")
    )]
    pub async fn register(&self, new_user: NewUser) -> ServiceResult<User> {
        let user = build_user(new_user, self.bcrypt_cost).await?;
        insert_user(self.users.as_ref(), &user).await?;
        tracing::info!("user registered");
        Ok(user)
    }

    /// Checks credentials and issues a signed token
    ///
    /// Unknown users and wrong passwords fail identically with
    /// `Unauthorized`.
    #[instrument(skip(self, password), err(level = "warn"))]
    pub async fn login(&self, user_id: &str, password: &str) -> ServiceResult<IssuedToken> {
        let invalid = || ServiceError::Unauthorized("Invalid credentials".to_string());

        let user_id = UserId::new(user_id).map_err(|_| invalid())?;
        let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!("login for unknown user");
            invalid()
        })?;

        let valid = verify_credential(password.to_string(), user.password_hash).await?;
        if !valid {
            tracing::warn!("login with wrong password");
            return Err(invalid());
        }

        let token = create_token(
            user_id.as_str(),
            &self.tokens.secret,
            self.tokens.expiry_hours,
        )
        .map_err(|e| ServiceError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("token issued");
        Ok(IssuedToken { token, user_id })
    }

    /// Validates an `Authorization` header value
    ///
    /// Fails with `Unauthorized` when the header is missing, is not of the
    /// form `Bearer <token>`, or the token does not verify.
    pub fn verify_bearer(&self, header: Option<&str>) -> ServiceResult<AuthenticatedUser> {
        let header = header
            .ok_or_else(|| ServiceError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ServiceError::Unauthorized(
                    "Invalid authorization format. Use: Bearer <token>".to_string(),
                )
            })?;

        let claims = verify_token(token, &self.tokens.secret)
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))?;

        let user_id = UserId::new(claims.sub.clone())
            .map_err(|e| ServiceError::Unauthorized(format!("Invalid token subject: {}", e)))?;

        Ok(AuthenticatedUser { user_id, claims })
    }
}
