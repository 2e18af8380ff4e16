//! The member record stored in a roster.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key holding the member identifier.
pub const MEMBER_ID_KEY: &str = "member_id";
/// Key holding the member's name.
pub const NAME_KEY: &str = "name";
/// Key holding the member's email address.
pub const EMAIL_KEY: &str = "email";
/// Key holding the date the member joined.
pub const JOIN_DATE_KEY: &str = "join_date";

/// A single trade union member.
///
/// None of the fields are validated: empty strings, malformed emails and
/// free-form dates are stored and displayed exactly as given. Uniqueness of
/// `member_id` is enforced by [`crate::Roster`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Externally assigned identifier, unique within a roster.
    pub member_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Join date as entered.
    pub join_date: String,
}

impl Member {
    /// Create a member from its four fields.
    #[must_use]
    pub fn new(
        member_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        join_date: impl Into<String>,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            name: name.into(),
            email: email.into(),
            join_date: join_date.into(),
        }
    }

    /// Convert to a JSON object keyed `member_id`, `name`, `email`, `join_date`, in that order.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(MEMBER_ID_KEY.to_string(), Value::from(self.member_id.as_str()));
        map.insert(NAME_KEY.to_string(), Value::from(self.name.as_str()));
        map.insert(EMAIL_KEY.to_string(), Value::from(self.email.as_str()));
        map.insert(JOIN_DATE_KEY.to_string(), Value::from(self.join_date.as_str()));
        map
    }

    /// Build a member from a JSON object produced by [`Member::to_map`].
    ///
    /// Extra keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if any of the four keys is absent and
    /// [`Error::InvalidField`] if one of them does not hold a string.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            member_id: string_field(map, MEMBER_ID_KEY)?,
            name: string_field(map, NAME_KEY)?,
            email: string_field(map, EMAIL_KEY)?,
            join_date: string_field(map, JOIN_DATE_KEY)?,
        })
    }

    /// One-line human readable summary, identical to the `Display` output.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

fn string_field(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match map.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::InvalidField { field }),
        None => Err(Error::MissingField { field }),
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member(ID: {}, Name: {}, Email: {}, Joined: {})",
            self.member_id, self.name, self.email, self.join_date
        )
    }
}
