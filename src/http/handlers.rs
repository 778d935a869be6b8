use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use super::AppState;
use crate::service::{CreateNoteRequest, NoteError, UpdateNoteRequest};
use crate::storage::{DeleteResult, StoredNote, UpdateResult};

pub async fn list_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredNote>>, NoteError> {
    state.service.list_notes().await.map(Json)
}

pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StoredNote>>, NoteError> {
    state.service.get_note(&id).await.map(Json)
}

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Json<StoredNote>, NoteError> {
    let Json(request) = payload?;
    state.service.create_note(request).await.map(Json)
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<UpdateResult>, NoteError> {
    let Json(request) = payload?;
    state.service.update_note(&id, request).await.map(Json)
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, NoteError> {
    state.service.delete_note(&id).await.map(Json)
}
