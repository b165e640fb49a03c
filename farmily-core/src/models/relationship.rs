use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{blank_as_none, Gender};

/// What `person1` is to `person2` on a stored relationship row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            "spouse" => Some(Self::Spouse),
            "sibling" => Some(Self::Sibling),
            _ => None,
        }
    }

    /// The same edge read from the other endpoint. Only parent and child
    /// swap; spouse and sibling are symmetric.
    pub fn invert(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Spouse | Self::Sibling => self,
        }
    }

    /// Label describing what the other endpoint is to `viewer`.
    ///
    /// The stored type says what person1 is to person2. A viewer in the
    /// person2 slot reads it as is; a viewer in the person1 slot needs the
    /// inverse, since the stored type describes the viewer rather than the
    /// other person.
    pub fn as_seen_by(self, viewer: Uuid, person1_id: Uuid) -> Self {
        if viewer == person1_id {
            self.invert()
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Uuid,
    pub person1_id: Uuid,
    pub person2_id: Uuid,
    pub relationship_type: RelationshipType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRelationshipInput {
    pub person1_id: Uuid,
    pub person2_id: Uuid,
    pub relationship_type: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub notes: Option<String>,
}

impl CreateRelationshipInput {
    pub fn new(person1_id: Uuid, person2_id: Uuid, relationship_type: RelationshipType) -> Self {
        Self {
            person1_id,
            person2_id,
            relationship_type: relationship_type.as_str().to_string(),
            start_date: None,
            end_date: None,
            notes: None,
        }
    }
}

/// A relationship as listed for one person, with `relationship_type`
/// relabeled to describe the other endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipView {
    pub id: Uuid,
    pub person1_id: Uuid,
    pub person1_name: String,
    pub person1_gender: Gender,
    pub person2_id: Uuid,
    pub person2_name: String,
    pub person2_gender: Gender,
    pub relationship_type: RelationshipType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
