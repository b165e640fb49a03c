use chrono::Utc;
use rusqlite::{params, Row};
use uuid::Uuid;

use super::{get_enum, get_uuid, person_exists, Database};
use crate::error::{Error, Result};
use crate::models::{CreateEventInput, Event, EventType};

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: get_uuid(row, 0)?,
        person_id: get_uuid(row, 1)?,
        event_type: get_enum(row, 2, EventType::from_str)?,
        event_date: row.get(3)?,
        event_place: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    pub fn create_event(&self, person_id: Uuid, input: &CreateEventInput) -> Result<Event> {
        let event_type = EventType::from_str(input.event_type.trim()).ok_or_else(|| {
            Error::validation(format!("Invalid event type: {}", input.event_type))
        })?;

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            person_id,
            event_type,
            event_date: input.event_date,
            event_place: input.event_place.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };

        self.with_connection(|conn| {
            if !person_exists(conn, person_id)? {
                return Err(Error::not_found(format!("Person {}", person_id)));
            }
            conn.execute(
                "INSERT INTO events (id, person_id, event_type, event_date, event_place, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    event.id.to_string(),
                    event.person_id.to_string(),
                    event.event_type.as_str(),
                    event.event_date,
                    event.event_place,
                    event.description,
                    event.created_at,
                    event.updated_at,
                ],
            )?;
            Ok(())
        })?;

        tracing::info!(
            "Created {} event {} for person {}",
            event_type.as_str(),
            event.id,
            person_id
        );
        Ok(event)
    }

    /// Dated events in chronological order, then undated ones.
    pub fn list_events_for_person(&self, person_id: Uuid) -> Result<Vec<Event>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, person_id, event_type, event_date, event_place, description,
                    created_at, updated_at
                 FROM events
                 WHERE person_id = ?1
                 ORDER BY event_date IS NULL, event_date, created_at",
            )?;
            let events = stmt
                .query_map([person_id.to_string()], event_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(events)
        })
    }

    pub fn delete_event(&self, id: Uuid) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM events WHERE id = ?1", [id.to_string()])?)
        })?;
        Ok(removed > 0)
    }
}
