//! Turning assistant replies into structured data.

use serde::Deserialize;

use crate::{
    error::{GardenError, Result},
    params::NewTask,
};

/// Splits a numbered list into its items.
///
/// Blank lines are dropped and a leading `N.` marker is stripped from each
/// line.
pub fn parse_questions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .map(strip_numbering)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < line.len() {
        if let Some(rest) = rest.strip_prefix('.') {
            return rest.trim();
        }
    }
    line
}

/// Extracts the JSON payload from a reply that may wrap it in a Markdown code
/// fence (```` ```json ```` or a plain ```` ``` ````).
pub fn extract_json(reply: &str) -> &str {
    let reply = reply.trim();
    let body = if let Some((_, rest)) = reply.split_once("```json") {
        rest
    } else if let Some((_, rest)) = reply.split_once("```") {
        rest
    } else {
        return reply;
    };
    body.split_once("```").map_or(body, |(inner, _)| inner).trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestedTask {
    description: String,
    #[serde(default)]
    date_range: String,
}

/// Parses a JSON array of `{description, dateRange}` objects into pending
/// tasks for `plant_id`.
pub fn parse_task_list(reply: &str, plant_id: &str) -> Result<Vec<NewTask>> {
    let suggested: Vec<SuggestedTask> =
        serde_json::from_str(extract_json(reply)).map_err(|e| GardenError::AiOutput {
            reason: format!("Failed to parse task list from AI response: {e}"),
        })?;

    Ok(suggested
        .into_iter()
        .map(|t| NewTask {
            plant_id: plant_id.to_string(),
            description: t.description,
            date_range: t.date_range,
            completed: false,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_questions_strips_numbering() {
        let reply = "1. How old is the plant?\n2.Is it in a pot?\n\n  10. Any pests?  \n";
        assert_eq!(
            parse_questions(reply),
            ["How old is the plant?", "Is it in a pot?", "Any pests?"]
        );
    }

    #[test]
    fn test_parse_questions_keeps_unnumbered_lines() {
        assert_eq!(
            parse_questions("What soil?\n2024 was dry"),
            ["What soil?", "2024 was dry"]
        );
    }

    #[test]
    fn test_parse_questions_drops_bare_numbers() {
        assert!(parse_questions("1.\n   \n").is_empty());
    }

    #[test]
    fn test_extract_json_fenced() {
        let reply = "Sure!\n```json\n[1, 2]\n```\nEnjoy.";
        assert_eq!(extract_json(reply), "[1, 2]");
    }

    #[test]
    fn test_extract_json_plain_fence() {
        assert_eq!(extract_json("```\n[]\n```"), "[]");
    }

    #[test]
    fn test_extract_json_unfenced() {
        assert_eq!(extract_json("  [ ]  "), "[ ]");
    }

    #[test]
    fn test_parse_task_list() {
        let reply = r#"```json
[
  {"description": "Fertilize", "dateRange": "01.04 - 30.04"},
  {"description": "Harvest"}
]
```"#;
        let tasks = parse_task_list(reply, "plant-1").unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].date_range, "01.04 - 30.04");
        assert_eq!(tasks[1].date_range, "");
        assert!(tasks.iter().all(|t| t.plant_id == "plant-1" && !t.completed));
    }

    #[test]
    fn test_parse_task_list_rejects_garbage() {
        let err = parse_task_list("no tasks today", "p").unwrap_err();
        assert!(err.to_string().starts_with("Could not parse AI output"));
    }
}
