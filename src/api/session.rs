use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use farmily_core::models::{NewUser, User};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};
use crate::auth::{hash_password, session_cookie, verify_password};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Issues a token for `user` and returns it both as a cookie and in the body.
fn signed_in(state: &AppState, user: &User, text: &str) -> Result<impl IntoResponse, ApiError> {
    let token = state.tokens.issue(user.id, &user.email)?;
    let cookie = session_cookie(&token, &state.tokens);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(json!({
            "success": true,
            "message": text,
            "token": token,
            "user": user,
        })),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let email = req.email.trim();
    if email.is_empty()
        || req.password.is_empty()
        || req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
    {
        return Err(ApiError::BadRequest("All fields are required".into()));
    }

    if state.db.get_user_by_email(email)?.is_some() {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let user = state.db.create_user(NewUser {
        email: email.to_string(),
        password_hash: hash_password(&req.password)?,
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
    })?;

    signed_in(&state, &user, "Registration successful")
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let invalid = || ApiError::Unauthorized("Invalid email or password".into());

    let user = state
        .db
        .get_user_by_email(req.email.trim())?
        .ok_or_else(invalid)?;
    if !verify_password(&req.password, &user.password_hash) {
        tracing::info!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    signed_in(&state, &user, "Login successful")
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, session_cookie("", &state.tokens))],
        Json(json!({
            "success": true,
            "message": "Logged out successfully",
        })),
    )
}
