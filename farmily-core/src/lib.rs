//! Core library for Farmily.
//!
//! This crate provides the genealogy models and database operations,
//! independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use farmily_core::db::Database;
//! use farmily_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let people = db.list_people()?;
//! # Ok::<(), farmily_core::Error>(())
//! ```

pub mod db;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use error::{Error, Result};
