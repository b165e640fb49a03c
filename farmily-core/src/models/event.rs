use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blank_as_none;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Birth,
    Death,
    Marriage,
    Divorce,
    Graduation,
    Employment,
    Retirement,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Death => "death",
            Self::Marriage => "marriage",
            Self::Divorce => "divorce",
            Self::Graduation => "graduation",
            Self::Employment => "employment",
            Self::Retirement => "retirement",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "birth" => Some(Self::Birth),
            "death" => Some(Self::Death),
            "marriage" => Some(Self::Marriage),
            "divorce" => Some(Self::Divorce),
            "graduation" => Some(Self::Graduation),
            "employment" => Some(Self::Employment),
            "retirement" => Some(Self::Retirement),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub person_id: Uuid,
    pub event_type: EventType,
    pub event_date: Option<NaiveDate>,
    pub event_place: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventInput {
    #[serde(default)]
    pub event_type: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub event_place: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
}

impl CreateEventInput {
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type: event_type.as_str().to_string(),
            event_date: None,
            event_place: None,
            description: None,
        }
    }
}
