use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use super::TokenKeys;
use crate::api::{ApiError, AppState};

const TOKEN_COOKIE: &str = "token";

/// The authenticated caller, attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Rejects requests without a valid session token or whose user no longer
/// exists; otherwise attaches an [`AuthUser`] extension for downstream
/// handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized - No token provided".into()))?;

    let invalid = || ApiError::Unauthorized("Unauthorized - Invalid token".into());
    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        invalid()
    })?;

    let user = state.db.get_user(claims.user_id)?.ok_or_else(|| {
        tracing::debug!("Rejected session token for unknown user {}", claims.user_id);
        invalid()
    })?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
    });
    Ok(next.run(request).await)
}

/// Token from the session cookie, falling back to a bearer header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// `Set-Cookie` value carrying the session token. An empty token expires
/// the cookie.
pub fn session_cookie(token: &str, keys: &TokenKeys) -> String {
    let max_age = if token.is_empty() {
        0
    } else {
        keys.ttl().as_secs()
    };
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_COOKIE, token, max_age
    )
}
