pub mod api;
pub mod auth;
pub mod config;

pub use farmily_core::{db, models};
