//! HTTP API. Every response is wrapped as `{success, data | message}`.

mod error;
mod people;
mod records;
mod relationships;
mod session;
mod tree;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::{middleware, Json, Router};
use farmily_core::Database;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, TokenKeys};
use crate::config::Config;

/// Shared handler state. `Database` calls are synchronous and serialize on a
/// single connection; handlers run them inline on the runtime worker.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenKeys::from_config(config)),
        }
    }
}

pub type ApiResult = Result<Json<Value>, ApiError>;

pub(crate) fn data(payload: impl Serialize) -> ApiResult {
    Ok(Json(json!({ "success": true, "data": payload })))
}

pub(crate) fn message(text: &str) -> ApiResult {
    Ok(Json(json!({ "success": true, "message": text })))
}

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/people", get(people::list_people).post(people::create_person))
        .route("/api/people/search", get(people::search_people))
        .route(
            "/api/people/{id}",
            get(people::get_person)
                .put(people::update_person)
                .delete(people::delete_person),
        )
        .route(
            "/api/people/{id}/relationships",
            get(relationships::list_for_person),
        )
        .route(
            "/api/people/{id}/events",
            get(records::list_events).post(records::create_event),
        )
        .route(
            "/api/people/{id}/media",
            get(records::list_media).post(records::create_media),
        )
        .route(
            "/api/people/{id}/notes",
            get(records::list_notes).post(records::create_note),
        )
        .route("/api/relationships", post(relationships::create_relationship))
        .route("/api/relationships/{id}", delete(relationships::delete_relationship))
        .route("/api/events/{id}", delete(records::delete_event))
        .route("/api/media/{id}", delete(records::delete_media))
        .route("/api/notes/{id}", delete(records::delete_note))
        .route("/api/tree/data", get(tree::tree_data))
        .route("/api/stats", get(tree::stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(session::register))
        .route("/api/auth/login", post(session::login))
        .route("/api/auth/logout", post(session::logout))
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".into())
}
