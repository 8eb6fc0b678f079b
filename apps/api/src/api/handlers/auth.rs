use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::services::NewUser;

/// Request body for user registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub user_password: String,
    pub user_mobile: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            user_id: req.user_id,
            user_name: req.user_name,
            password: req.user_password,
            user_mobile: req.user_mobile,
        }
    }
}

/// Response from successful registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub user_password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

/// Register a new user
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.auth.register(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.user_id.to_string(),
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login and receive a bearer token
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state.auth.login(&req.user_id, &req.user_password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        user_id: issued.user_id.to_string(),
    }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
