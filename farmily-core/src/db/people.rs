use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{
    equivalent_edge_exists, get_enum, get_opt_uuid, get_uuid, like_pattern, person_exists,
    Database,
};
use crate::error::{Error, Result};
use crate::models::{Gender, ParentLinks, Person, PersonInput, RelationshipType};

const PERSON_COLUMNS: &str = "id, first_name, middle_name, last_name, maiden_name, gender,
    birth_date, birth_place, death_date, death_place, is_living,
    occupation, biography, profile_photo_url, created_by, created_at, updated_at";

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: get_uuid(row, 0)?,
        first_name: row.get(1)?,
        middle_name: row.get(2)?,
        last_name: row.get(3)?,
        maiden_name: row.get(4)?,
        gender: get_enum(row, 5, Gender::from_str)?,
        birth_date: row.get(6)?,
        birth_place: row.get(7)?,
        death_date: row.get(8)?,
        death_place: row.get(9)?,
        is_living: row.get(10)?,
        occupation: row.get(11)?,
        biography: row.get(12)?,
        profile_photo_url: row.get(13)?,
        created_by: get_opt_uuid(row, 14)?,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}

/// Inserts a `child` edge from the person to each supplied parent. A parent
/// already linked by an equivalent edge is left as is.
fn link_parents(conn: &Connection, person_id: Uuid, parents: &ParentLinks) -> Result<()> {
    let now = Utc::now();
    for parent_id in parents.ids() {
        if !person_exists(conn, parent_id)? {
            return Err(Error::not_found(format!("Parent person {}", parent_id)));
        }
        if equivalent_edge_exists(conn, person_id, parent_id, RelationshipType::Child)? {
            tracing::warn!("Person {} is already linked to parent {}", person_id, parent_id);
            continue;
        }
        conn.execute(
            "INSERT INTO relationships (id, person1_id, person2_id, relationship_type, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                Uuid::new_v4().to_string(),
                person_id.to_string(),
                parent_id.to_string(),
                RelationshipType::Child.as_str(),
                now,
            ],
        )?;
    }
    Ok(())
}

impl Database {
    pub fn list_people(&self) -> Result<Vec<Person>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM people ORDER BY last_name, first_name",
                PERSON_COLUMNS
            ))?;
            let people = stmt
                .query_map([], person_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(people)
        })
    }

    /// Case-insensitive substring match on first, middle or last name.
    /// A blank query returns everyone.
    pub fn search_people(&self, query: &str) -> Result<Vec<Person>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_people();
        }

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM people
                 WHERE first_name LIKE ?1 ESCAPE '\\'
                    OR middle_name LIKE ?1 ESCAPE '\\'
                    OR last_name LIKE ?1 ESCAPE '\\'
                 ORDER BY last_name, first_name",
                PERSON_COLUMNS
            ))?;
            let people = stmt
                .query_map([like_pattern(query)], person_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(people)
        })
    }

    pub fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        self.with_connection(|conn| {
            let person = conn
                .query_row(
                    &format!("SELECT {} FROM people WHERE id = ?1", PERSON_COLUMNS),
                    [id.to_string()],
                    person_from_row,
                )
                .optional()?;
            Ok(person)
        })
    }

    /// Inserts a person and a `child` edge to each supplied parent in one
    /// transaction. Nothing is committed if any step fails.
    pub fn create_person(
        &self,
        input: &PersonInput,
        parents: ParentLinks,
        created_by: Option<Uuid>,
    ) -> Result<Person> {
        let gender = input.validate()?;
        let now = Utc::now();
        let person = Person {
            id: Uuid::new_v4(),
            first_name: input.first_name.trim().to_string(),
            middle_name: input.middle_name.clone(),
            last_name: input.last_name.trim().to_string(),
            maiden_name: input.maiden_name.clone(),
            gender,
            birth_date: input.birth_date,
            birth_place: input.birth_place.clone(),
            death_date: input.death_date,
            death_place: input.death_place.clone(),
            is_living: input.is_living,
            occupation: input.occupation.clone(),
            biography: input.biography.clone(),
            profile_photo_url: input.profile_photo_url.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        parents.validate_for(person.id)?;

        self.with_transaction(|tx| {
            tx.execute(
                &format!(
                    "INSERT INTO people ({})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                    PERSON_COLUMNS
                ),
                params![
                    person.id.to_string(),
                    person.first_name,
                    person.middle_name,
                    person.last_name,
                    person.maiden_name,
                    person.gender.as_str(),
                    person.birth_date,
                    person.birth_place,
                    person.death_date,
                    person.death_place,
                    person.is_living,
                    person.occupation,
                    person.biography,
                    person.profile_photo_url,
                    person.created_by.map(|id| id.to_string()),
                    person.created_at,
                    person.updated_at,
                ],
            )?;
            link_parents(tx, person.id, &parents)
        })?;

        tracing::info!("Created person {} ({})", person.id, person.display_name());
        Ok(person)
    }

    /// Overwrites every field of the person and replaces all of their parent
    /// links, stored either as `person child parent` or `parent parent
    /// person`, with the supplied parents. A parent omitted here is unlinked.
    pub fn update_person(&self, id: Uuid, input: &PersonInput, parents: ParentLinks) -> Result<()> {
        let gender = input.validate()?;
        parents.validate_for(id)?;

        self.with_transaction(|tx| {
            let changed = tx.execute(
                "UPDATE people SET
                    first_name = ?1, middle_name = ?2, last_name = ?3, maiden_name = ?4,
                    gender = ?5, birth_date = ?6, birth_place = ?7, death_date = ?8,
                    death_place = ?9, is_living = ?10, occupation = ?11, biography = ?12,
                    profile_photo_url = ?13, updated_at = ?14
                 WHERE id = ?15",
                params![
                    input.first_name.trim(),
                    input.middle_name,
                    input.last_name.trim(),
                    input.maiden_name,
                    gender.as_str(),
                    input.birth_date,
                    input.birth_place,
                    input.death_date,
                    input.death_place,
                    input.is_living,
                    input.occupation,
                    input.biography,
                    input.profile_photo_url,
                    Utc::now(),
                    id.to_string(),
                ],
            )?;
            if changed == 0 {
                return Err(Error::not_found(format!("Person {}", id)));
            }

            tx.execute(
                "DELETE FROM relationships
                 WHERE (person1_id = ?1 AND relationship_type = ?2)
                    OR (person2_id = ?1 AND relationship_type = ?3)",
                params![
                    id.to_string(),
                    RelationshipType::Child.as_str(),
                    RelationshipType::Parent.as_str(),
                ],
            )?;
            link_parents(tx, id, &parents)
        })?;

        tracing::info!("Updated person {}", id);
        Ok(())
    }

    /// Deletes the person. Relationships, events, media and notes go with it
    /// through the schema's cascades. Returns whether a row was removed;
    /// deleting an unknown id is not an error.
    pub fn delete_person(&self, id: Uuid) -> Result<bool> {
        let removed = self.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM people WHERE id = ?1", [id.to_string()])?)
        })?;
        if removed > 0 {
            tracing::info!("Deleted person {}", id);
        }
        Ok(removed > 0)
    }
}
