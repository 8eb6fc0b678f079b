use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::handlers::auth::RegisterRequest;
use crate::api::middleware::JwtAuth;
use crate::api::state::AppState;
use crate::domain::user::User;
use crate::services::UserUpdate;

/// Request body for updating a user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_name: Option<String>,
    pub user_password: Option<String>,
    pub user_mobile: Option<String>,
}

/// User as returned to clients; the credential hash is never exposed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub user_name: String,
    pub user_mobile: Option<String>,
    pub user_added_date: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            user_name: user.user_name.clone(),
            user_mobile: user.user_mobile.clone(),
            user_added_date: user.user_added_date,
        }
    }
}

/// Create a user
///
/// POST /api/v1/user
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.users.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Get a user by id
///
/// GET /api/v1/user/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_by_id(&caller.user_id, &user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Update a user
///
/// PUT /api/v1/user/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let update = UserUpdate {
        user_name: req.user_name,
        password: req.user_password,
        user_mobile: req.user_mobile,
    };
    let user = state.users.update(&caller.user_id, &user_id, update).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Delete a user
///
/// DELETE /api/v1/user/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state.users.delete(&caller.user_id, &user_id).await?;
    Ok(StatusCode::OK)
}
