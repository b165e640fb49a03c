use chrono::Utc;
use rusqlite::{params, ErrorCode, OptionalExtension, Row};
use uuid::Uuid;

use super::{get_uuid, Database};
use crate::error::{Error, Result};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, created_at, updated_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: get_uuid(row, 0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

impl Database {
    /// Inserts a user. A duplicate email is a `Conflict`.
    pub fn create_user(&self, new: NewUser) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            created_at: now,
            updated_at: now,
        };

        let inserted = self.with_connection(|conn| {
            Ok(conn.execute(
                &format!(
                    "INSERT INTO users ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    USER_COLUMNS
                ),
                params![
                    user.id.to_string(),
                    user.email,
                    user.password_hash,
                    user.first_name,
                    user.last_name,
                    user.created_at,
                    user.updated_at,
                ],
            )?)
        });

        match inserted {
            Ok(_) => {
                tracing::info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(Error::Store(rusqlite::Error::SqliteFailure(e, _)))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::Conflict("Email already registered".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.with_connection(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                    [id.to_string()],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_connection(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                    [email],
                    user_from_row,
                )
                .optional()?;
            Ok(user)
        })
    }
}
