//! Collection wrapper types for displaying groups of records.

use std::fmt;

use crate::models::{PlantView, Task};

/// Newtype wrapper for displaying a list of plants.
///
/// # Examples
///
/// ```rust
/// use garden_core::display::Plants;
///
/// assert_eq!(Plants(vec![]).to_string(), "No plants found.\n");
/// ```
pub struct Plants(pub Vec<PlantView>);

impl Plants {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlantView> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Plants {
    type Item = &'a PlantView;
    type IntoIter = std::slice::Iter<'a, PlantView>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plants found.")
        } else {
            for plant in &self.0 {
                write!(f, "{plant}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of tasks as a checklist.
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Plant;

    fn view(id: &str, name: &str) -> PlantView {
        let at = Timestamp::from_second(1_640_995_200).unwrap();
        PlantView {
            plant: Plant {
                id: id.to_string(),
                name: name.to_string(),
                latin_name: "Mentha".to_string(),
                age: None,
                goals: None,
                other_info: None,
                created_at: at,
                updated_at: at,
            },
            thumbnail_url: None,
        }
    }

    fn task(id: &str, completed: bool) -> Task {
        let at = Timestamp::from_second(1_640_995_200).unwrap();
        Task {
            id: id.to_string(),
            plant_id: "p".to_string(),
            description: format!("Task {id}"),
            date_range: "01.05".to_string(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_plants_display() {
        let plants = Plants(vec![view("1", "Mint"), view("2", "Spearmint")]);
        let output = plants.to_string();
        assert!(output.contains("## Mint (Mentha)"));
        assert!(output.contains("## Spearmint (Mentha)"));
        assert_eq!(plants.len(), 2);

        assert_eq!(Plants(vec![]).to_string(), "No plants found.\n");
    }

    #[test]
    fn test_tasks_display() {
        let tasks = Tasks(vec![task("a", false), task("b", true)]);
        let output = tasks.to_string();
        assert!(output.contains("○ Pending **Task a**"));
        assert!(output.contains("✓ Done **Task b**"));

        assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
    }
}
