use rusqlite::Row;

use super::{get_enum, get_uuid, Database};
use crate::error::Result;
use crate::models::{display_name, Gender, RelationshipType, TreeGraph, TreeLink, TreeNode};

fn node_from_row(row: &Row<'_>) -> rusqlite::Result<TreeNode> {
    let first: String = row.get(1)?;
    let middle: Option<String> = row.get(2)?;
    let last: String = row.get(3)?;
    let maiden: Option<String> = row.get(4)?;

    Ok(TreeNode {
        id: get_uuid(row, 0)?,
        name: display_name(&first, middle.as_deref(), &last, maiden.as_deref()),
        gender: get_enum(row, 5, Gender::from_str)?,
        photo_url: row.get(6)?,
        birth_date: row.get(7)?,
        death_date: row.get(8)?,
    })
}

impl Database {
    /// Flattens all people and relationships into nodes and links. Links
    /// keep the stored direction: source is person1, target is person2.
    pub fn build_tree(&self) -> Result<TreeGraph> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, middle_name, last_name, maiden_name, gender,
                    profile_photo_url, birth_date, death_date
                 FROM people
                 ORDER BY last_name, first_name",
            )?;
            let nodes = stmt
                .query_map([], node_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut stmt = conn.prepare(
                "SELECT person1_id, person2_id, relationship_type
                 FROM relationships
                 ORDER BY created_at, rowid",
            )?;
            let links = stmt
                .query_map([], |row| {
                    Ok(TreeLink {
                        source: get_uuid(row, 0)?,
                        target: get_uuid(row, 1)?,
                        kind: get_enum(row, 2, RelationshipType::from_str)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(TreeGraph { nodes, links })
        })
    }
}
