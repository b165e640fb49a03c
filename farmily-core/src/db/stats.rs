use super::Database;
use crate::error::Result;
use crate::models::Stats;

impl Database {
    pub fn stats(&self) -> Result<Stats> {
        self.with_connection(|conn| {
            let stats = conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM people),
                    (SELECT COUNT(*) FROM people WHERE is_living = 1),
                    (SELECT COUNT(*) FROM people WHERE is_living = 0),
                    (SELECT COUNT(*) FROM relationships),
                    (SELECT COUNT(*) FROM events)",
                [],
                |row| {
                    Ok(Stats {
                        total_people: row.get(0)?,
                        living_people: row.get(1)?,
                        deceased_people: row.get(2)?,
                        total_relationships: row.get(3)?,
                        total_events: row.get(4)?,
                    })
                },
            )?;
            Ok(stats)
        })
    }
}
