use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{get_enum, get_opt_uuid, get_uuid, person_exists, Database};
use crate::error::{Error, Result};
use crate::models::{CreateMediaInput, Media, MediaType};

fn media_from_row(row: &Row<'_>) -> rusqlite::Result<Media> {
    Ok(Media {
        id: get_uuid(row, 0)?,
        person_id: get_uuid(row, 1)?,
        event_id: get_opt_uuid(row, 2)?,
        file_path: row.get(3)?,
        file_type: get_enum(row, 4, MediaType::from_str)?,
        title: row.get(5)?,
        description: row.get(6)?,
        upload_date: row.get(7)?,
    })
}

impl Database {
    /// Records metadata for a file attached to a person. When `event_id` is
    /// given it must name an event of the same person.
    pub fn create_media(&self, person_id: Uuid, input: &CreateMediaInput) -> Result<Media> {
        let file_path = input.file_path.trim();
        if file_path.is_empty() {
            return Err(Error::validation("File path is required"));
        }
        let file_type = MediaType::from_str(input.file_type.trim()).ok_or_else(|| {
            Error::validation(format!("Invalid file type: {}", input.file_type))
        })?;

        let media = Media {
            id: Uuid::new_v4(),
            person_id,
            event_id: input.event_id,
            file_path: file_path.to_string(),
            file_type,
            title: input.title.clone(),
            description: input.description.clone(),
            upload_date: Utc::now(),
        };

        self.with_connection(|conn| {
            if !person_exists(conn, person_id)? {
                return Err(Error::not_found(format!("Person {}", person_id)));
            }
            if let Some(event_id) = media.event_id {
                let owner: Option<String> = conn
                    .query_row(
                        "SELECT person_id FROM events WHERE id = ?1",
                        [event_id.to_string()],
                        |row| row.get(0),
                    )
                    .optional()?;
                match owner {
                    None => return Err(Error::not_found(format!("Event {}", event_id))),
                    Some(owner) if owner != person_id.to_string() => {
                        return Err(Error::validation("Event belongs to a different person"))
                    }
                    Some(_) => {}
                }
            }

            conn.execute(
                "INSERT INTO media (id, person_id, event_id, file_path, file_type, title, description, upload_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    media.id.to_string(),
                    media.person_id.to_string(),
                    media.event_id.map(|id| id.to_string()),
                    media.file_path,
                    media.file_type.as_str(),
                    media.title,
                    media.description,
                    media.upload_date,
                ],
            )?;
            Ok(())
        })?;

        tracing::info!(
            "Attached {} {} to person {}",
            file_type.as_str(),
            media.id,
            person_id
        );
        Ok(media)
    }

    pub fn list_media_for_person(&self, person_id: Uuid) -> Result<Vec<Media>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, person_id, event_id, file_path, file_type, title, description, upload_date
                 FROM media
                 WHERE person_id = ?1
                 ORDER BY upload_date DESC, rowid DESC",
            )?;
            let media = stmt
                .query_map([person_id.to_string()], media_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(media)
        })
    }

    pub fn delete_media(&self, id: Uuid) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM media WHERE id = ?1", [id.to_string()])?)
        })?;
        Ok(removed > 0)
    }
}
