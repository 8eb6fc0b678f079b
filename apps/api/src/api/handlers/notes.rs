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
use crate::domain::note::Note;
use crate::services::NoteDraft;

/// Request body for creating or updating a note
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    pub note_id: i32,
    pub note_title: String,
    #[serde(default)]
    pub note_content: String,
    pub note_status: Option<String>,
    pub category_id: Option<String>,
    pub note_created_by: Option<String>,
}

impl From<NoteRequest> for NoteDraft {
    fn from(req: NoteRequest) -> Self {
        NoteDraft {
            note_id: req.note_id,
            note_title: req.note_title,
            note_content: req.note_content,
            note_status: req.note_status,
            category_id: req.category_id,
            note_created_by: req.note_created_by,
        }
    }
}

/// Create a note in the owner's bucket
///
/// POST /api/v1/note
pub async fn create_note(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.notes.create(&caller.user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete every note of a user
///
/// DELETE /api/v1/note/:user_id
pub async fn delete_all_notes(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    state.notes.delete_all(&caller.user_id, &user_id).await?;
    Ok(StatusCode::OK)
}

/// Delete a single note
///
/// DELETE /api/v1/note/:user_id/:note_id
pub async fn delete_note(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath((user_id, note_id)): ApiPath<(String, i32)>,
) -> Result<StatusCode, ApiError> {
    state
        .notes
        .delete(&caller.user_id, &user_id, note_id)
        .await?;
    Ok(StatusCode::OK)
}

/// Replace a note
///
/// PUT /api/v1/note/:user_id/:note_id
pub async fn update_note(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath((user_id, note_id)): ApiPath<(String, i32)>,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .notes
        .update(&caller.user_id, &user_id, note_id, req.into())
        .await?;
    Ok(Json(note))
}

/// Get all notes of a user
///
/// GET /api/v1/note/:user_id
pub async fn get_notes_by_user(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .notes
        .list_by_user_id(&caller.user_id, &user_id)
        .await?;
    Ok(Json(notes))
}

/// Get one note of a user
///
/// GET /api/v1/note/:user_id/:note_id
pub async fn get_note(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    ApiPath((user_id, note_id)): ApiPath<(String, i32)>,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .notes
        .get_by_note_id_and_user_id(&caller.user_id, &user_id, note_id)
        .await?;
    Ok(Json(note))
}
