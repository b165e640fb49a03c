//! Password hashing, session tokens and the request guard that checks them.

mod middleware;
mod password;
mod token;

pub use middleware::{require_auth, session_cookie, AuthUser};
pub use password::{hash_password, verify_password};
pub use token::TokenKeys;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
