use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use farmily_core::models::CreateRelationshipInput;
use serde_json::json;

use super::error::parse_id;
use super::{data, message, ApiResult, AppState};

pub async fn list_for_person(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id, "person")?;
    data(state.db.list_relationships_for_person(id)?)
}

pub async fn create_relationship(
    State(state): State<AppState>,
    payload: Result<Json<CreateRelationshipInput>, JsonRejection>,
) -> ApiResult {
    let Json(input) = payload?;
    let relationship = state.db.create_relationship(&input)?;

    Ok(Json(json!({
        "success": true,
        "message": "Relationship created successfully",
        "id": relationship.id,
        "data": relationship,
    })))
}

pub async fn delete_relationship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = parse_id(&id, "relationship")?;
    state.db.delete_relationship(id)?;
    message("Relationship deleted successfully")
}
