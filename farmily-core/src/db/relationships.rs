use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{equivalent_edge_exists, get_enum, get_uuid, person_exists, Database};
use crate::error::{Error, Result};
use crate::models::{
    CreateRelationshipInput, Gender, Relationship, RelationshipType, RelationshipView,
};

fn relationship_from_row(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    Ok(Relationship {
        id: get_uuid(row, 0)?,
        person1_id: get_uuid(row, 1)?,
        person2_id: get_uuid(row, 2)?,
        relationship_type: get_enum(row, 3, RelationshipType::from_str)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl Database {
    pub fn create_relationship(&self, input: &CreateRelationshipInput) -> Result<Relationship> {
        let kind = RelationshipType::from_str(input.relationship_type.trim()).ok_or_else(|| {
            Error::validation(format!(
                "Invalid relationship type: {}",
                input.relationship_type
            ))
        })?;
        if input.person1_id == input.person2_id {
            return Err(Error::validation(
                "A relationship needs two different people",
            ));
        }

        let now = Utc::now();
        let relationship = Relationship {
            id: Uuid::new_v4(),
            person1_id: input.person1_id,
            person2_id: input.person2_id,
            relationship_type: kind,
            start_date: input.start_date,
            end_date: input.end_date,
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        self.with_transaction(|tx| {
            for id in [relationship.person1_id, relationship.person2_id] {
                if !person_exists(tx, id)? {
                    return Err(Error::not_found(format!("Person {}", id)));
                }
            }
            if equivalent_edge_exists(
                tx,
                relationship.person1_id,
                relationship.person2_id,
                kind,
            )? {
                return Err(Error::Conflict(
                    "This relationship already exists".to_string(),
                ));
            }

            tx.execute(
                "INSERT INTO relationships
                    (id, person1_id, person2_id, relationship_type, start_date, end_date, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    relationship.id.to_string(),
                    relationship.person1_id.to_string(),
                    relationship.person2_id.to_string(),
                    kind.as_str(),
                    relationship.start_date,
                    relationship.end_date,
                    relationship.notes,
                    relationship.created_at,
                    relationship.updated_at,
                ],
            )?;
            Ok(())
        })?;

        tracing::info!(
            "Created relationship {}: {} is {} of {}",
            relationship.id,
            relationship.person1_id,
            kind.as_str(),
            relationship.person2_id
        );
        Ok(relationship)
    }

    pub fn get_relationship(&self, id: Uuid) -> Result<Option<Relationship>> {
        self.with_connection(|conn| {
            let relationship = conn
                .query_row(
                    "SELECT id, person1_id, person2_id, relationship_type, start_date, end_date,
                        notes, created_at, updated_at
                     FROM relationships WHERE id = ?1",
                    [id.to_string()],
                    relationship_from_row,
                )
                .optional()?;
            Ok(relationship)
        })
    }

    /// Returns whether a row was removed; deleting an unknown id is not an
    /// error.
    pub fn delete_relationship(&self, id: Uuid) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM relationships WHERE id = ?1", [id.to_string()])?)
        })?;
        if removed > 0 {
            tracing::info!("Deleted relationship {}", id);
        }
        Ok(removed > 0)
    }

    /// Every relationship touching `person_id`, newest first, labeled with
    /// what the other person is to `person_id`.
    pub fn list_relationships_for_person(&self, person_id: Uuid) -> Result<Vec<RelationshipView>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT r.id, r.person1_id, r.person2_id, r.relationship_type,
                    r.start_date, r.end_date, r.notes, r.created_at, r.updated_at,
                    p1.first_name || ' ' || p1.last_name,
                    p2.first_name || ' ' || p2.last_name,
                    p1.gender, p2.gender
                 FROM relationships r
                 JOIN people p1 ON r.person1_id = p1.id
                 JOIN people p2 ON r.person2_id = p2.id
                 WHERE r.person1_id = ?1 OR r.person2_id = ?1
                 ORDER BY r.created_at DESC, r.rowid DESC",
            )?;

            let views = stmt
                .query_map([person_id.to_string()], |row| {
                    let stored = relationship_from_row(row)?;
                    Ok(RelationshipView {
                        id: stored.id,
                        person1_id: stored.person1_id,
                        person1_name: row.get(9)?,
                        person1_gender: get_enum(row, 11, Gender::from_str)?,
                        person2_id: stored.person2_id,
                        person2_name: row.get(10)?,
                        person2_gender: get_enum(row, 12, Gender::from_str)?,
                        relationship_type: stored
                            .relationship_type
                            .as_seen_by(person_id, stored.person1_id),
                        start_date: stored.start_date,
                        end_date: stored.end_date,
                        notes: stored.notes,
                        created_at: stored.created_at,
                        updated_at: stored.updated_at,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(views)
        })
    }
}
