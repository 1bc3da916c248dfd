//! Display implementations for domain models.
//!
//! Plants render as a `##` section with a metadata list; tasks render as a
//! single list item so a collection of them reads as a checklist.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Plant, PlantView, Task};

impl Plant {
    fn fmt_plant(&self, f: &mut fmt::Formatter<'_>, thumbnail: Option<&str>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.name, self.latin_name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        if let Some(age) = &self.age {
            writeln!(f, "- Age: {age}")?;
        }
        if let Some(goals) = &self.goals {
            writeln!(f, "- Goals: {goals}")?;
        }
        if let Some(url) = thumbnail {
            writeln!(f, "- Thumbnail: {url}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(info) = &self.other_info {
            writeln!(f)?;
            writeln!(f, "{info}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_plant(f, None)
    }
}

impl fmt::Display for PlantView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.plant.fmt_plant(f, self.thumbnail_url.as_deref())
    }
}

impl Task {
    /// Completion state as an icon followed by a word.
    pub fn status_with_icon(&self) -> &'static str {
        if self.completed {
            "✓ Done"
        } else {
            "○ Pending"
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} **{}**", self.status_with_icon(), self.description)?;
        if !self.date_range.is_empty() {
            write!(f, " ({})", self.date_range)?;
        }
        writeln!(f)?;
        writeln!(f, "  ID: `{}`", self.id)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn plant() -> Plant {
        let at = Timestamp::from_second(1_640_995_200).unwrap();
        Plant {
            id: "p-1".to_string(),
            name: "Fig".to_string(),
            latin_name: "Ficus carica".to_string(),
            age: Some("4 years".to_string()),
            goals: None,
            other_info: Some("South-facing wall.".to_string()),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_plant_display() {
        let output = plant().to_string();
        assert!(output.starts_with("## Fig (Ficus carica)\n"));
        assert!(output.contains("- ID: p-1"));
        assert!(output.contains("- Age: 4 years"));
        assert!(!output.contains("Goals"));
        assert!(!output.contains("Thumbnail"));
        assert!(output.contains("South-facing wall."));
    }

    #[test]
    fn test_plant_view_shows_thumbnail() {
        let view = PlantView {
            plant: plant(),
            thumbnail_url: Some("blob:garden/abc".to_string()),
        };
        assert!(view.to_string().contains("- Thumbnail: blob:garden/abc"));
    }

    #[test]
    fn test_task_display() {
        let at = Timestamp::from_second(1_640_995_200).unwrap();
        let mut task = Task {
            id: "t-1".to_string(),
            plant_id: "p-1".to_string(),
            description: "Mulch".to_string(),
            date_range: "01.11 - 15.11".to_string(),
            completed: false,
            created_at: at,
            updated_at: at,
        };
        assert_eq!(
            task.to_string(),
            "- ○ Pending **Mulch** (01.11 - 15.11)\n  ID: `t-1`\n"
        );

        task.completed = true;
        task.date_range.clear();
        assert_eq!(task.to_string(), "- ✓ Done **Mulch**\n  ID: `t-1`\n");
    }
}
