use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,
}

/// One stored relationship row in its canonical direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeLink {
    pub source: Uuid,
    pub target: Uuid,
    #[serde(rename = "type")]
    pub kind: super::RelationshipType,
}

/// Node/edge export of the whole family graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeGraph {
    pub nodes: Vec<TreeNode>,
    pub links: Vec<TreeLink>,
}
