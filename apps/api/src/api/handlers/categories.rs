use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::middleware::JwtAuth;
use crate::api::state::AppState;
use crate::domain::category::Category;
use crate::services::{CategoryUpdate, NewCategory};

/// Request body for creating a category
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub category_id: Option<String>,
    pub category_name: String,
    #[serde(default)]
    pub category_description: String,
    pub category_created_by: Option<String>,
}

/// Request body for updating a category
///
/// Any `categoryId` or `categoryCreatedBy` in the body is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub category_name: String,
    #[serde(default)]
    pub category_description: String,
}

/// Create a category
///
/// POST /api/v1/category
pub async fn create_category(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let new_category = NewCategory {
        category_id: req.category_id,
        category_name: req.category_name,
        category_description: req.category_description,
        category_created_by: req.category_created_by,
    };
    let category = state.categories.create(&caller.user_id, new_category).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by id
///
/// GET /api/v1/category/:category_id
pub async fn get_category(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(category_id): ApiPath<String>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .categories
        .get_by_id(&caller.user_id, &category_id)
        .await?;
    Ok(Json(category))
}

/// Update a category
///
/// PUT /api/v1/category/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(category_id): ApiPath<String>,
    ApiJson(req): ApiJson<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let update = CategoryUpdate {
        category_name: req.category_name,
        category_description: req.category_description,
    };
    let category = state
        .categories
        .update(&caller.user_id, &category_id, update)
        .await?;
    Ok(Json(category))
}

/// Delete a category
///
/// DELETE /api/v1/category/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(category_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state
        .categories
        .delete(&caller.user_id, &category_id)
        .await?;
    Ok(StatusCode::OK)
}

/// Get all categories created by a user
///
/// GET /api/v1/category/user/:user_id
pub async fn get_categories_by_user(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state
        .categories
        .list_by_owner(&caller.user_id, &user_id)
        .await?;
    Ok(Json(categories))
}
