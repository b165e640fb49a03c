use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{get_opt_uuid, get_uuid, person_exists, Database};
use crate::error::{Error, Result};
use crate::models::{CreateNoteInput, Note};

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: get_uuid(row, 0)?,
        person_id: get_uuid(row, 1)?,
        content: row.get(2)?,
        created_by: get_opt_uuid(row, 3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl Database {
    pub fn create_note(
        &self,
        person_id: Uuid,
        input: &CreateNoteInput,
        created_by: Option<Uuid>,
    ) -> Result<Note> {
        if input.content.trim().is_empty() {
            return Err(Error::validation("Note content is required"));
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            person_id,
            content: input.content.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };

        self.with_connection(|conn| {
            if !person_exists(conn, person_id)? {
                return Err(Error::not_found(format!("Person {}", person_id)));
            }
            conn.execute(
                "INSERT INTO notes (id, person_id, content, created_by, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    note.id.to_string(),
                    note.person_id.to_string(),
                    note.content,
                    note.created_by.map(|id| id.to_string()),
                    note.created_at,
                    note.updated_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(note)
    }

    pub fn list_notes_for_person(&self, person_id: Uuid) -> Result<Vec<Note>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, person_id, content, created_by, created_at, updated_at
                 FROM notes
                 WHERE person_id = ?1
                 ORDER BY created_at DESC, rowid DESC",
            )?;
            let notes = stmt
                .query_map([person_id.to_string()], note_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(notes)
        })
    }

    pub fn delete_note(&self, id: Uuid) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?)
        })?;
        Ok(removed > 0)
    }
}
