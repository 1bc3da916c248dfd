//! Task model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{new_id, timestamps};
use crate::params::NewTask;

/// A seasonal care item belonging to a plant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// ID of the plant this task belongs to
    pub plant_id: String,

    /// What to do, e.g. "Prune dead branches"
    pub description: String,

    /// Free-text date span such as "01.03 - 15.04"; never parsed
    pub date_range: String,

    /// Whether the task has been done
    pub completed: bool,

    /// When the task was created (epoch millis on the wire)
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: Timestamp,

    /// When the task was last modified (epoch millis on the wire)
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub updated_at: Timestamp,
}

impl Task {
    /// Builds a new task created at `now`.
    pub fn create_at(fields: NewTask, now: Timestamp) -> Self {
        Self {
            id: new_id(),
            plant_id: fields.plant_id,
            description: fields.description,
            date_range: fields.date_range,
            completed: fields.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a new task created now.
    pub fn create(fields: NewTask) -> Self {
        Self::create_at(fields, timestamps::now())
    }

    /// Refreshes `updated_at` so it is strictly later than before.
    pub fn touch(&mut self) {
        self.updated_at = timestamps::advance(self.updated_at.max(self.created_at));
    }

    /// Flips completion and bumps `updated_at`.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }
}
