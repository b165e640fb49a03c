use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_people: i64,
    pub living_people: i64,
    pub deceased_people: i64,
    pub total_relationships: i64,
    pub total_events: i64,
}
