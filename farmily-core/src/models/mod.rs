mod event;
mod media;
mod note;
mod person;
mod relationship;
mod stats;
mod tree;
mod user;

pub use event::*;
pub use media::*;
pub use note::*;
pub use person::*;
pub use relationship::*;
pub use stats::*;
pub use tree::*;
pub use user::*;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserializes an optional field, treating a missing value, `null` or a
/// blank string as `None`. Form posts send `""` for untouched inputs.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
