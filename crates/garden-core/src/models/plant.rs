//! Plant model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{new_id, timestamps};
use crate::params::NewPlant;

/// A tracked plant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Unique identifier, immutable once created
    pub id: String,

    /// Common name of the plant
    pub name: String,

    /// Botanical (latin) name
    pub latin_name: String,

    /// Free-text age, e.g. "3 years"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    /// Free-text care goals, e.g. "harvest in autumn"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,

    /// Anything else worth remembering about the plant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,

    /// When the plant was recorded (epoch millis on the wire)
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: Timestamp,

    /// When the plant was last modified (epoch millis on the wire)
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub updated_at: Timestamp,
}

impl Plant {
    /// Builds a new plant with a generated id and `created_at == updated_at`.
    pub fn create(fields: NewPlant) -> Self {
        let now = timestamps::now();
        Self {
            id: new_id(),
            name: fields.name,
            latin_name: fields.latin_name,
            age: fields.age,
            goals: fields.goals,
            other_info: fields.other_info,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at` so it is strictly later than before.
    pub fn touch(&mut self) {
        self.updated_at = timestamps::advance(self.updated_at.max(self.created_at));
    }
}
