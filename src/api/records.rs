//! Events, media metadata and notes attached to a person.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use farmily_core::models::{CreateEventInput, CreateMediaInput, CreateNoteInput};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::error::parse_id;
use super::{data, message, ApiResult, AppState};
use crate::auth::AuthUser;

fn created(what: &str, id: Uuid, record: impl Serialize) -> ApiResult {
    Ok(Json(json!({
        "success": true,
        "message": format!("{} created successfully", what),
        "id": id,
        "data": record,
    })))
}

pub async fn list_events(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    data(state.db.list_events_for_person(id)?)
}

pub async fn create_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateEventInput>, JsonRejection>,
) -> ApiResult {
    let id = parse_id(&id, "person")?;
    let Json(input) = payload?;
    let event = state.db.create_event(id, &input)?;
    created("Event", event.id, event)
}

pub async fn delete_event(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "event")?;
    state.db.delete_event(id)?;
    message("Event deleted successfully")
}

pub async fn list_media(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    data(state.db.list_media_for_person(id)?)
}

pub async fn create_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateMediaInput>, JsonRejection>,
) -> ApiResult {
    let id = parse_id(&id, "person")?;
    let Json(input) = payload?;
    let media = state.db.create_media(id, &input)?;
    created("Media", media.id, media)
}

pub async fn delete_media(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "media")?;
    state.db.delete_media(id)?;
    message("Media deleted successfully")
}

pub async fn list_notes(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    data(state.db.list_notes_for_person(id)?)
}

pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<CreateNoteInput>, JsonRejection>,
) -> ApiResult {
    let id = parse_id(&id, "person")?;
    let Json(input) = payload?;
    let note = state.db.create_note(id, &input, Some(user.id))?;
    created("Note", note.id, note)
}

pub async fn delete_note(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "note")?;
    state.db.delete_note(id)?;
    message("Note deleted successfully")
}
