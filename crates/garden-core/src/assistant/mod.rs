//! LLM-backed gardening assistant.
//!
//! The chat-completion service is a collaborator behind [`ChatCompletion`].
//! [`OpenAiClient`] talks to the OpenAI HTTP API; tests substitute canned
//! replies. [`Assistant`] builds the prompts and turns replies into follow-up
//! questions or [`NewTask`] lists.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
    error::{GardenError, Result},
    models::Plant,
    params::NewTask,
};

mod openai;
mod parse;

pub use openai::OpenAiClient;
pub use parse::{extract_json, parse_questions, parse_task_list};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation with the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A chat-completion service: messages in, reply text out.
pub trait ChatCompletion: Send + Sync {
    fn complete(
        &self,
        messages: &[ChatMessage],
        api_key: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Fails with `InvalidInput` unless `api_key` has non-whitespace content.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(GardenError::invalid_input("apiKey")
            .with_reason("OpenAI API key is required. Please add it in Settings."));
    }
    Ok(())
}

const QUESTIONS_SYSTEM_PROMPT: &str = "You are a helpful gardening assistant. \
Generate 3-5 relevant follow-up questions about a plant to gather important care information. \
Focus on: age, health status, growing conditions, goals (e.g., harvest, ornamental), soil type, \
sunlight exposure, watering needs, and any specific concerns. Keep questions concise and practical.";

const TASKS_SYSTEM_PROMPT: &str = r#"You are an expert gardener. Based on the plant information and conversation, generate a comprehensive list of seasonal care tasks. Each task should include:
1. A clear description of what to do
2. A specific date range (format: DD.MM - DD.MM or just DD.MM for single date)

Consider: pruning, fertilizing, watering schedules, pest control, harvesting, winterization, etc. Be specific and practical. Provide 3-8 tasks depending on the plant's needs.

Return the tasks in JSON format as an array:
[
  {
    "description": "Task description",
    "dateRange": "DD.MM - DD.MM"
  }
]"#;

/// Gardening assistant on top of a [`ChatCompletion`] service.
#[derive(Debug, Clone)]
pub struct Assistant<C> {
    client: C,
}

impl<C: ChatCompletion> Assistant<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Asks for 3-5 questions that would help care for the plant.
    pub async fn follow_up_questions(
        &self,
        name: &str,
        latin_name: &str,
        api_key: &str,
    ) -> Result<Vec<String>> {
        validate_api_key(api_key)?;

        let prompt = format!(
            "Plant Name: {name}\nLatin Name: {latin_name}\n\n\
             Generate 3-5 follow-up questions to understand this plant better. \
             Return only the questions, one per line, numbered."
        );
        let messages = [
            ChatMessage::system(QUESTIONS_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        let reply = self.client.complete(&messages, api_key).await?;
        Ok(parse_questions(&reply))
    }

    /// Asks for a seasonal care plan for `plant`, taking the earlier
    /// conversation into account.
    ///
    /// Every returned task belongs to `plant` and starts out pending. A reply
    /// without a readable JSON task array fails with `AiOutput`.
    pub async fn generate_tasks(
        &self,
        plant: &Plant,
        history: &[ChatMessage],
        api_key: &str,
    ) -> Result<Vec<NewTask>> {
        validate_api_key(api_key)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(TASKS_SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(task_prompt(plant)));

        let reply = self.client.complete(&messages, api_key).await?;
        parse_task_list(&reply, &plant.id).inspect_err(|e| {
            log::error!("Failed to parse tasks from AI response: {e}");
            log::debug!("AI response was: {reply}");
        })
    }

    /// Free-form conversation.
    pub async fn chat(&self, messages: &[ChatMessage], api_key: &str) -> Result<String> {
        validate_api_key(api_key)?;
        self.client.complete(messages, api_key).await
    }
}

fn task_prompt(plant: &Plant) -> String {
    let mut prompt = format!("Plant: {} ({})\n", plant.name, plant.latin_name);
    if let Some(age) = &plant.age {
        prompt.push_str(&format!("Age: {age}\n"));
    }
    if let Some(goals) = &plant.goals {
        prompt.push_str(&format!("Goals: {goals}\n"));
    }
    if let Some(other_info) = &plant.other_info {
        prompt.push_str(&format!("Additional Info: {other_info}\n"));
    }
    prompt.push_str("\nGenerate seasonal care tasks for this plant.");
    prompt
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::params::NewPlant;

    /// Replies with a fixed text and remembers what it was asked.
    struct Canned {
        reply: String,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl Canned {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatCompletion for Canned {
        async fn complete(&self, messages: &[ChatMessage], _api_key: &str) -> Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            Ok(self.reply.clone())
        }
    }

    fn rosemary() -> Plant {
        Plant::create(NewPlant {
            name: "Rosemary".to_string(),
            latin_name: "Salvia rosmarinus".to_string(),
            goals: Some("cooking".to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_blank_key_is_rejected_before_calling() {
        let assistant = Assistant::new(Canned::new("1. Why?"));
        let err = assistant
            .follow_up_questions("Basil", "Ocimum basilicum", "  ")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("OpenAI API key is required"));
        assert!(assistant.client().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_questions() {
        let assistant = Assistant::new(Canned::new(
            "1. How old is it?\n\n2. Where does it grow?\n3.   Is it potted?",
        ));
        let questions = assistant
            .follow_up_questions("Basil", "Ocimum basilicum", "sk-test")
            .await
            .unwrap();

        assert_eq!(
            questions,
            ["How old is it?", "Where does it grow?", "Is it potted?"]
        );

        let seen = assistant.client().seen.lock().unwrap();
        assert_eq!(seen[0][0].role, Role::System);
        assert!(seen[0][1].content.contains("Latin Name: Ocimum basilicum"));
    }

    #[tokio::test]
    async fn test_generate_tasks_includes_history_and_plant() {
        let plant = rosemary();
        let assistant = Assistant::new(Canned::new(
            "Here you go:\n```json\n[{\"description\": \"Prune\", \"dateRange\": \"01.03 - 15.03\"}]\n```",
        ));
        let history = [ChatMessage::assistant("How old is it?"), ChatMessage::user("Two years")];

        let tasks = assistant
            .generate_tasks(&plant, &history, "sk-test")
            .await
            .unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].plant_id, plant.id);
        assert_eq!(tasks[0].description, "Prune");
        assert_eq!(tasks[0].date_range, "01.03 - 15.03");
        assert!(!tasks[0].completed);

        let seen = assistant.client().seen.lock().unwrap();
        let sent = &seen[0];
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[1], history[0]);
        assert!(sent[3].content.contains("Plant: Rosemary (Salvia rosmarinus)"));
        assert!(sent[3].content.contains("Goals: cooking"));
        assert!(!sent[3].content.contains("Age:"));
    }

    #[tokio::test]
    async fn test_generate_tasks_unparseable_reply() {
        let assistant = Assistant::new(Canned::new("I would rather not."));
        let err = assistant
            .generate_tasks(&rosemary(), &[], "sk-test")
            .await
            .unwrap_err();
        assert!(matches!(err, GardenError::AiOutput { .. }));
    }

    #[tokio::test]
    async fn test_chat_passthrough() {
        let assistant = Assistant::new(Canned::new("Water it weekly."));
        let reply = assistant
            .chat(&[ChatMessage::user("How often?")], "sk-test")
            .await
            .unwrap();
        assert_eq!(reply, "Water it weekly.");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::system("hi")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"hi"}"#);
    }
}
