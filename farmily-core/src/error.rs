use thiserror::Error;

/// Errors surfaced by the core models and database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// A point lookup referenced an id that does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The write would duplicate an existing record.
    #[error("{0}")]
    Conflict(String),

    /// Connection or query failure. Any open transaction has been rolled back.
    #[error("database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
