use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use farmily_core::models::{ParentLinks, PersonInput, PersonView};
use serde::Deserialize;
use serde_json::json;

use super::error::parse_id;
use super::{data, message, ApiError, ApiResult, AppState};
use crate::auth::AuthUser;

/// Person fields plus the parent ids to link. Parent ids arrive as plain
/// strings; blank or malformed ones are ignored.
#[derive(Debug, Deserialize)]
pub struct PersonRequest {
    #[serde(flatten)]
    pub person: PersonInput,
    #[serde(default)]
    pub father_id: Option<String>,
    #[serde(default)]
    pub mother_id: Option<String>,
}

impl PersonRequest {
    fn parents(&self) -> ParentLinks {
        ParentLinks::parse(self.father_id.as_deref(), self.mother_id.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn list_people(State(state): State<AppState>) -> ApiResult {
    let people: Vec<PersonView> = state.db.list_people()?.iter().map(|p| p.to_view()).collect();
    data(people)
}

pub async fn search_people(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let people: Vec<PersonView> = state
        .db
        .search_people(&query.q)?
        .iter()
        .map(|p| p.to_view())
        .collect();
    data(people)
}

pub async fn get_person(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    let person = state
        .db
        .get_person(id)?
        .ok_or_else(|| ApiError::NotFound("Person not found".into()))?;
    data(person.to_view())
}

pub async fn create_person(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload?;
    let person = state
        .db
        .create_person(&req.person, req.parents(), Some(user.id))?;

    Ok(Json(json!({
        "success": true,
        "message": "Person created successfully",
        "id": person.id,
        "data": person.to_view(),
    })))
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PersonRequest>, JsonRejection>,
) -> ApiResult {
    let id = parse_id(&id, "person")?;
    let Json(req) = payload?;
    state.db.update_person(id, &req.person, req.parents())?;
    message("Person updated successfully")
}

pub async fn delete_person(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    state.db.delete_person(id)?;
    message("Person deleted successfully")
}
