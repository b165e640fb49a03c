use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blank_as_none;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// First name, middle name if any, last name, then the maiden name in
/// parentheses if any.
pub fn display_name(first: &str, middle: Option<&str>, last: &str, maiden: Option<&str>) -> String {
    let mut name = first.to_string();
    if let Some(middle) = middle.filter(|m| !m.is_empty()) {
        name.push(' ');
        name.push_str(middle);
    }
    name.push(' ');
    name.push_str(last);
    if let Some(maiden) = maiden.filter(|m| !m.is_empty()) {
        name.push_str(&format!(" ({})", maiden));
    }
    name
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub maiden_name: Option<String>,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub death_date: Option<NaiveDate>,
    pub death_place: Option<String>,
    pub is_living: bool,
    pub occupation: Option<String>,
    pub biography: Option<String>,
    pub profile_photo_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn display_name(&self) -> String {
        display_name(
            &self.first_name,
            self.middle_name.as_deref(),
            &self.last_name,
            self.maiden_name.as_deref(),
        )
    }

    /// Whole years between birth and death, or between birth and `today` if
    /// no death date is recorded.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let end = self.death_date.unwrap_or(today);

        let mut age = end.year() - birth.year();
        if (end.month(), end.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }

    pub fn age(&self) -> Option<i32> {
        self.age_on(Utc::now().date_naive())
    }

    pub fn lifespan(&self) -> String {
        let Some(birth) = self.birth_date else {
            return "Unknown".to_string();
        };

        match self.death_date {
            Some(death) => format!("{} - {}", birth.year(), death.year()),
            None if self.is_living => format!("{} - Present", birth.year()),
            None => format!("{} - ?", birth.year()),
        }
    }

    pub fn to_view(&self) -> PersonView {
        self.to_view_on(Utc::now().date_naive())
    }

    pub fn to_view_on(&self, today: NaiveDate) -> PersonView {
        PersonView {
            display_name: self.display_name(),
            age: self.age_on(today),
            lifespan: self.lifespan(),
            person: self.clone(),
        }
    }
}

/// Person as returned to clients, with fields derived at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonView {
    #[serde(flatten)]
    pub person: Person,
    pub display_name: String,
    pub age: Option<i32>,
    pub lifespan: String,
}

fn default_living() -> bool {
    true
}

/// Writable person fields. Shared by create and update; an update replaces
/// every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    #[serde(default)]
    pub first_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub maiden_name: Option<String>,
    #[serde(default)]
    pub gender: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub birth_place: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub death_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub death_place: Option<String>,
    #[serde(default = "default_living")]
    pub is_living: bool,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub biography: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub profile_photo_url: Option<String>,
}

impl PersonInput {
    pub fn new(first_name: &str, last_name: &str, gender: Gender) -> Self {
        Self {
            first_name: first_name.to_string(),
            middle_name: None,
            last_name: last_name.to_string(),
            maiden_name: None,
            gender: gender.as_str().to_string(),
            birth_date: None,
            birth_place: None,
            death_date: None,
            death_place: None,
            is_living: true,
            occupation: None,
            biography: None,
            profile_photo_url: None,
        }
    }

    /// Checks required fields and returns the parsed gender.
    pub fn validate(&self) -> Result<Gender> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.gender.trim().is_empty()
        {
            return Err(Error::validation(
                "First name, last name, and gender are required",
            ));
        }
        Gender::from_str(self.gender.trim())
            .ok_or_else(|| Error::validation(format!("Invalid gender: {}", self.gender)))
    }
}

/// Parent links supplied alongside a person write. Each present id becomes a
/// `child` relationship from the person to that parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParentLinks {
    pub father: Option<Uuid>,
    pub mother: Option<Uuid>,
}

impl ParentLinks {
    /// Parses raw id strings. Blank values are absent; values that are not
    /// UUIDs are skipped with a warning.
    pub fn parse(father: Option<&str>, mother: Option<&str>) -> Self {
        Self {
            father: parse_parent_id("father_id", father),
            mother: parse_parent_id("mother_id", mother),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> {
        self.father.into_iter().chain(self.mother)
    }

    pub(crate) fn validate_for(&self, person_id: Uuid) -> Result<()> {
        if self.ids().any(|id| id == person_id) {
            return Err(Error::validation("A person cannot be their own parent"));
        }
        if self.father.is_some() && self.father == self.mother {
            return Err(Error::validation("Father and mother must be different people"));
        }
        Ok(())
    }
}

fn parse_parent_id(field: &str, raw: Option<&str>) -> Option<Uuid> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Ignoring unparseable {} {:?}: {}", field, raw, e);
            None
        }
    }
}
