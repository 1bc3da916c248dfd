//! Parameter structures for garden operations
//!
//! These structures carry user-supplied fields between the interface layers
//! (CLI, assistant output) and the view-state managers. Derived fields such
//! as ids and timestamps are never part of them: the managers generate those.
//!
//! Interface layers wrap these in their own argument types and convert with
//! `From`:
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct AddPlantArgs {
//!     pub name: String,
//!     pub latin_name: String,
//! }
//!
//! impl From<AddPlantArgs> for NewPlant {
//!     fn from(val: AddPlantArgs) -> Self {
//!         NewPlant {
//!             name: val.name,
//!             latin_name: val.latin_name,
//!             ..Default::default()
//!         }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Plant, Task};

/// Fields for recording a new plant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    /// Common name (required)
    pub name: String,
    /// Botanical name (required)
    pub latin_name: String,
    /// Optional free-text age
    pub age: Option<String>,
    /// Optional care goals
    pub goals: Option<String>,
    /// Optional additional notes
    pub other_info: Option<String>,
}

/// Fields for creating a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Plant the task belongs to; must reference an existing plant
    pub plant_id: String,
    /// What to do
    pub description: String,
    /// Free-text date span
    pub date_range: String,
    /// Initial completion state
    #[serde(default)]
    pub completed: bool,
}

/// Partial changes to an existing plant. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct PlantChanges {
    pub name: Option<String>,
    pub latin_name: Option<String>,
    pub age: Option<String>,
    pub goals: Option<String>,
    pub other_info: Option<String>,
}

impl PlantChanges {
    /// Whether applying these changes would modify anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.latin_name.is_none()
            && self.age.is_none()
            && self.goals.is_none()
            && self.other_info.is_none()
    }

    /// Copies the provided fields onto `plant`. Timestamps are left to the
    /// caller.
    pub fn apply(self, plant: &mut Plant) {
        if let Some(name) = self.name {
            plant.name = name;
        }
        if let Some(latin_name) = self.latin_name {
            plant.latin_name = latin_name;
        }
        if let Some(age) = self.age {
            plant.age = Some(age);
        }
        if let Some(goals) = self.goals {
            plant.goals = Some(goals);
        }
        if let Some(other_info) = self.other_info {
            plant.other_info = Some(other_info);
        }
    }
}

/// Partial changes to an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub description: Option<String>,
    pub date_range: Option<String>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Whether applying these changes would modify anything.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.date_range.is_none() && self.completed.is_none()
    }

    /// Copies the provided fields onto `task`.
    pub fn apply(self, task: &mut Task) {
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(date_range) = self.date_range {
            task.date_range = date_range;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Task completion filter backed by the `completed` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// The stored value of the `completed` flag for this status.
    pub fn completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}
