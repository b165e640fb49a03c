mod events;
mod media;
mod notes;
mod people;
mod relationships;
pub mod schema;
mod stats;
mod tree;
mod users;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::types::{FromSqlError, Type};
use rusqlite::{params, Connection, Row, Transaction};
use uuid::Uuid;

use crate::error::Result;
use crate::models::RelationshipType;

/// Shared handle to the SQLite store. Cloning is cheap; all clones use the
/// same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!("Opening database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Opens `farmily.db` in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "farmily").ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine a data directory",
            )
        })?;
        Self::open(dirs.data_dir().join("farmily.db"))
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations");
        let conn = self.conn.lock();
        conn.execute_batch(schema::SCHEMA)?;
        tracing::info!("Database migrations complete");
        Ok(())
    }

    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Runs `f` inside a transaction. The transaction commits only if `f`
    /// returns `Ok`; any error rolls back every write made by `f`.
    pub(crate) fn with_transaction<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}

pub(crate) fn get_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn get_opt_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| Uuid::parse_str(&t))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a TEXT enum column through the type's `from_str`.
pub(crate) fn get_enum<T>(
    row: &Row<'_>,
    idx: usize,
    parse: impl FnOnce(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    parse(&text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(FromSqlError::Other(
                format!("unknown enum value {:?}", text).into(),
            )),
        )
    })
}

pub(crate) fn person_exists(conn: &Connection, id: Uuid) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM people WHERE id = ?1)",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// True if an edge with the same meaning is already stored: the same ordered
/// pair and type, or the reversed pair with the inverted type.
pub(crate) fn equivalent_edge_exists(
    conn: &Connection,
    person1_id: Uuid,
    person2_id: Uuid,
    kind: RelationshipType,
) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM relationships
            WHERE (person1_id = ?1 AND person2_id = ?2 AND relationship_type = ?3)
               OR (person1_id = ?2 AND person2_id = ?1 AND relationship_type = ?4)
        )",
        params![
            person1_id.to_string(),
            person2_id.to_string(),
            kind.as_str(),
            kind.invert().as_str(),
        ],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Escapes `%`, `_` and `\` so user text matches literally inside LIKE.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
