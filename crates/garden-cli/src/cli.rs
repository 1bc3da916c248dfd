//! Command-line argument wrappers and command handlers
//!
//! Argument structs carry clap attributes and convert into the core parameter
//! types with `From`, so `garden-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → View-State Managers
//! ```
//!
//! [`Cli`] drives the plant and task managers. Managers report failures
//! through their view state rather than `Result`, so each handler turns a
//! `None`/`false` outcome back into an error using the recorded message.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use garden_core::{
    assistant::{Assistant, ChatMessage, OpenAiClient},
    display::{CreateResult, DeleteResult, Plants, Tasks, UpdateResult},
    models::{Plant, Task},
    params::{NewPlant, NewTask, PlantChanges, TaskChanges, TaskStatus},
    GardenError, GardenStore, PlantManager, SettingsStore, TaskManager,
};
use log::debug;

use crate::{images::JpegProcessor, renderer::TerminalRenderer};

const CHAT_SYSTEM_PROMPT: &str =
    "You are a helpful gardening assistant. Give practical, concise plant-care advice.";

// Plants

/// Record a new plant
#[derive(Args)]
pub struct AddPlantArgs {
    /// Common name, e.g. "Basil"
    pub name: String,
    /// Botanical name, e.g. "Ocimum basilicum"
    pub latin_name: String,
    #[arg(long, help = "How old the plant is, in your own words")]
    pub age: Option<String>,
    #[arg(short, long, help = "What you want from the plant (harvest, blooms, ...)")]
    pub goals: Option<String>,
    #[arg(short, long, help = "Anything else worth remembering")]
    pub other_info: Option<String>,
    #[arg(short, long, help = "Image file to compress and attach as the plant's photo")]
    pub photo: Option<PathBuf>,
}

impl From<AddPlantArgs> for NewPlant {
    fn from(val: AddPlantArgs) -> Self {
        NewPlant {
            name: val.name,
            latin_name: val.latin_name,
            age: val.age,
            goals: val.goals,
            other_info: val.other_info,
        }
    }
}

/// Change fields of a plant or replace its photo
#[derive(Args)]
pub struct UpdatePlantArgs {
    #[arg(help = "ID of the plant to update")]
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub latin_name: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(short, long)]
    pub goals: Option<String>,
    #[arg(short, long)]
    pub other_info: Option<String>,
    #[arg(short, long, help = "Image file that replaces the current photo")]
    pub photo: Option<PathBuf>,
}

impl From<UpdatePlantArgs> for PlantChanges {
    fn from(val: UpdatePlantArgs) -> Self {
        PlantChanges {
            name: val.name,
            latin_name: val.latin_name,
            age: val.age,
            goals: val.goals,
            other_info: val.other_info,
        }
    }
}

#[derive(Args)]
pub struct PlantIdArgs {
    #[arg(help = "ID of the plant")]
    pub id: String,
}

/// Save a plant's photo to a file
#[derive(Args)]
pub struct PhotoArgs {
    #[arg(help = "ID of the plant")]
    pub id: String,
    #[arg(short, long, help = "Where to write the JPEG")]
    pub output: PathBuf,
    #[arg(long, help = "Export the thumbnail instead of the full image")]
    pub thumbnail: bool,
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// Record a new plant
    #[command(alias = "a")]
    Add(AddPlantArgs),
    /// List all plants, oldest first
    #[command(alias = "ls")]
    List,
    /// Show a plant with its photo and tasks
    #[command(alias = "s")]
    Show(PlantIdArgs),
    /// Change a plant
    #[command(alias = "u")]
    Update(UpdatePlantArgs),
    /// Delete a plant together with its photo and tasks
    #[command(alias = "rm")]
    Delete(PlantIdArgs),
    /// Export a plant's photo
    Photo(PhotoArgs),
}

// Tasks

/// Add a care task to a plant
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "ID of the plant the task belongs to")]
    pub plant_id: String,
    /// What to do
    pub description: String,
    #[arg(
        short,
        long,
        default_value = "",
        help = "When to do it, e.g. \"01.03 - 15.03\""
    )]
    pub date_range: String,
}

impl From<AddTaskArgs> for NewTask {
    fn from(val: AddTaskArgs) -> Self {
        NewTask {
            plant_id: val.plant_id,
            description: val.description,
            date_range: val.date_range,
            completed: false,
        }
    }
}

#[derive(Args)]
pub struct ListTasksArgs {
    #[arg(short, long, help = "Only tasks of this plant")]
    pub plant: Option<String>,
    #[arg(long, conflicts_with = "completed", help = "Only tasks not done yet")]
    pub pending: bool,
    #[arg(long, help = "Only finished tasks")]
    pub completed: bool,
}

impl ListTasksArgs {
    fn status(&self) -> Option<TaskStatus> {
        match (self.pending, self.completed) {
            (true, _) => Some(TaskStatus::Pending),
            (_, true) => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "ID of the task to update")]
    pub id: String,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short = 'r', long)]
    pub date_range: Option<String>,
    #[arg(short, long, help = "Set completion explicitly (true/false)")]
    pub completed: Option<bool>,
}

impl From<UpdateTaskArgs> for TaskChanges {
    fn from(val: UpdateTaskArgs) -> Self {
        TaskChanges {
            description: val.description,
            date_range: val.date_range,
            completed: val.completed,
        }
    }
}

#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "ID of the task")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to a plant
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks, newest first
    #[command(alias = "ls")]
    List(ListTasksArgs),
    /// Change a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Flip a task between pending and done
    #[command(alias = "x")]
    Toggle(TaskIdArgs),
    /// Delete a task
    #[command(alias = "rm")]
    Delete(TaskIdArgs),
}

// Settings

#[derive(Args)]
pub struct SetKeyArgs {
    /// OpenAI API key
    pub key: String,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Store the OpenAI API key
    SetKey(SetKeyArgs),
    /// Forget the stored OpenAI API key
    ClearKey,
}

// Assistant

#[derive(Args)]
pub struct AssistTasksArgs {
    #[arg(help = "ID of the plant to plan for")]
    pub plant_id: String,
    #[arg(
        short,
        long,
        help = "Extra context for the assistant, e.g. answers to its questions (repeatable)"
    )]
    pub note: Vec<String>,
    #[arg(long, help = "Add the suggested tasks to the plant")]
    pub save: bool,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Your message
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

#[derive(Subcommand)]
pub enum AssistCommands {
    /// Suggest questions that help care for a plant
    #[command(alias = "q")]
    Questions(PlantIdArgs),
    /// Generate a seasonal care plan for a plant
    #[command(alias = "t")]
    Tasks(AssistTasksArgs),
    /// Ask a free-form gardening question
    #[command(alias = "c")]
    Chat(ChatArgs),
}

// Handlers

/// Runs commands against the garden store and renders the results.
pub struct Cli {
    store: GardenStore,
    settings_file: Option<PathBuf>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: GardenStore, settings_file: Option<PathBuf>, renderer: TerminalRenderer) -> Self {
        Self {
            store,
            settings_file,
            renderer,
        }
    }

    fn plants(&self) -> PlantManager {
        PlantManager::new(self.store.clone(), Arc::new(JpegProcessor::default()))
    }

    fn tasks(&self) -> TaskManager {
        TaskManager::new(self.store.clone())
    }

    fn settings(&self) -> Result<SettingsStore> {
        match &self.settings_file {
            Some(path) => Ok(SettingsStore::open(path)),
            None => SettingsStore::open_default().context("Failed to open settings"),
        }
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        match command {
            PlantCommands::Add(args) => self.add_plant(args).await,
            PlantCommands::List => self.list_plants().await,
            PlantCommands::Show(args) => self.show_plant(&args.id).await,
            PlantCommands::Update(args) => self.update_plant(args).await,
            PlantCommands::Delete(args) => self.delete_plant(&args.id).await,
            PlantCommands::Photo(args) => self.export_photo(args).await,
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => self.add_task(args).await,
            TaskCommands::List(args) => self.list_tasks(&args).await,
            TaskCommands::Update(args) => self.update_task(args).await,
            TaskCommands::Toggle(args) => self.toggle_task(&args.id).await,
            TaskCommands::Delete(args) => self.delete_task(&args.id).await,
        }
    }

    pub fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        let mut settings = self.settings()?;
        let output = match command {
            SettingsCommands::Show => {
                let key = match settings.get_api_key() {
                    Some(key) if settings.has_api_key() => format!("set ({})", mask_key(key)),
                    _ => "not set".to_string(),
                };
                format!("# Settings\n\n- API key: {key}\n")
            }
            SettingsCommands::SetKey(SetKeyArgs { key }) => {
                if key.trim().is_empty() {
                    return Err(GardenError::invalid_input("key")
                        .with_reason("must not be blank")
                        .into());
                }
                settings.set_api_key(key).context("Failed to save API key")?;
                "API key saved.\n".to_string()
            }
            SettingsCommands::ClearKey => {
                settings
                    .clear_api_key()
                    .context("Failed to clear API key")?;
                "API key cleared.\n".to_string()
            }
        };
        self.renderer.render(&output)
    }

    pub async fn handle_assist_command(&self, command: AssistCommands) -> Result<()> {
        let settings = self.settings()?;
        let api_key = settings.get_api_key().unwrap_or_default();
        let assistant =
            Assistant::new(OpenAiClient::new().context("Failed to create HTTP client")?);

        match command {
            AssistCommands::Questions(args) => {
                let plant = self.find_plant(&args.id).await?;
                let questions = assistant
                    .follow_up_questions(&plant.name, &plant.latin_name, api_key)
                    .await
                    .context("Failed to generate follow-up questions")?;

                let mut output = format!("# Questions about {}\n\n", plant.name);
                for (i, question) in questions.iter().enumerate() {
                    output.push_str(&format!("{}. {question}\n", i + 1));
                }
                self.renderer.render(&output)
            }
            AssistCommands::Tasks(args) => {
                let plant = self.find_plant(&args.plant_id).await?;
                let history: Vec<_> = args.note.into_iter().map(ChatMessage::user).collect();
                let suggestions = assistant
                    .generate_tasks(&plant, &history, api_key)
                    .await
                    .context("Failed to generate tasks")?;

                if args.save {
                    let tasks = self.tasks();
                    let expected = suggestions.len();
                    let created = tasks.create_many(suggestions).await;
                    if created.len() < expected {
                        return Err(failure(tasks.state().error, "Failed to save tasks"));
                    }
                    return self.renderer.render(&CreateResult::new(created).to_string());
                }

                let mut output = format!("# Suggested tasks for {}\n\n", plant.name);
                for task in &suggestions {
                    output.push_str(&format!("- **{}** ({})\n", task.description, task.date_range));
                }
                output.push_str("\nRun again with --save to add them.\n");
                self.renderer.render(&output)
            }
            AssistCommands::Chat(args) => {
                let messages = [
                    ChatMessage::system(CHAT_SYSTEM_PROMPT),
                    ChatMessage::user(args.message.join(" ")),
                ];
                let reply = assistant
                    .chat(&messages, api_key)
                    .await
                    .context("Failed to chat with the assistant")?;
                self.renderer.render(&format!("{reply}\n"))
            }
        }
    }

    async fn find_plant(&self, id: &str) -> Result<Plant> {
        self.store
            .get_plant(id)
            .await
            .context("Failed to look up plant")?
            .ok_or_else(|| anyhow!(GardenError::PlantNotFound { id: id.to_string() }))
    }

    async fn find_task(&self, id: &str) -> Result<Task> {
        self.store
            .get_task(id)
            .await
            .context("Failed to look up task")?
            .ok_or_else(|| anyhow!(GardenError::TaskNotFound { id: id.to_string() }))
    }

    async fn add_plant(&self, args: AddPlantArgs) -> Result<()> {
        let photo = read_photo(args.photo.as_deref())?;
        let plants = self.plants();
        let plant = plants
            .create(args.into(), photo)
            .await
            .ok_or_else(|| failure(plants.state().error, "Failed to create plant"))?;
        self.renderer.render(&CreateResult::new(plant).to_string())
    }

    pub async fn list_plants(&self) -> Result<()> {
        let plants = self.plants();
        plants.refresh().await;
        let state = plants.state();
        if let Some(error) = state.error {
            bail!("Failed to list plants: {error}");
        }

        let output = format!("# Plants\n\n{}", Plants(state.items));
        let released = plants.release_thumbnails();
        debug!("Released {released} thumbnail handles");
        self.renderer.render(&output)
    }

    async fn show_plant(&self, id: &str) -> Result<()> {
        let plant = self.find_plant(id).await?;
        let photo = self
            .store
            .get_photo(id)
            .await
            .context("Failed to load photo")?;

        let tasks = self.tasks();
        tasks.refresh_for_plant(id).await;
        let state = tasks.state();
        if let Some(error) = state.error {
            bail!("Failed to load tasks: {error}");
        }

        let mut output = plant.to_string();
        match photo {
            Some(photo) => output.push_str(&format!(
                "Photo: {} bytes, thumbnail {} bytes\n\n",
                photo.full_image.len(),
                photo.thumbnail.len()
            )),
            None => output.push_str("No photo.\n\n"),
        }
        output.push_str(&format!("### Tasks\n\n{}", Tasks(state.items)));
        self.renderer.render(&output)
    }

    async fn update_plant(&self, args: UpdatePlantArgs) -> Result<()> {
        let mut plant = self.find_plant(&args.id).await?;
        let photo = read_photo(args.photo.as_deref())?;
        let changes: PlantChanges = args.into();
        if changes.is_empty() && photo.is_none() {
            bail!("Nothing to update: pass at least one field or --photo");
        }

        let mut summary = describe_plant_changes(&changes);
        if photo.is_some() {
            summary.push("Replaced photo".to_string());
        }
        changes.apply(&mut plant);

        let plants = self.plants();
        let plant = plants
            .update(plant, photo)
            .await
            .ok_or_else(|| failure(plants.state().error, "Failed to update plant"))?;
        self.renderer
            .render(&UpdateResult::with_changes(plant, summary).to_string())
    }

    async fn delete_plant(&self, id: &str) -> Result<()> {
        let plant = self.find_plant(id).await?;
        let plants = self.plants();
        if !plants.remove(id).await {
            return Err(failure(plants.state().error, "Failed to delete plant"));
        }
        self.renderer.render(&DeleteResult::new(plant).to_string())
    }

    async fn export_photo(&self, args: PhotoArgs) -> Result<()> {
        let plant = self.find_plant(&args.id).await?;
        let Some(photo) = self
            .store
            .get_photo(&plant.id)
            .await
            .context("Failed to load photo")?
        else {
            bail!("Plant '{}' has no photo", plant.name);
        };

        let (kind, bytes) = if args.thumbnail {
            ("thumbnail", photo.thumbnail)
        } else {
            ("photo", photo.full_image)
        };
        fs::write(&args.output, &bytes)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;

        self.renderer.render(&format!(
            "Saved {kind} of '{}' to {} ({} bytes)\n",
            plant.name,
            args.output.display(),
            bytes.len()
        ))
    }

    async fn add_task(&self, args: AddTaskArgs) -> Result<()> {
        self.find_plant(&args.plant_id).await?;
        let tasks = self.tasks();
        let task = tasks
            .create(args.into())
            .await
            .ok_or_else(|| failure(tasks.state().error, "Failed to create task"))?;
        self.renderer.render(&CreateResult::new(task).to_string())
    }

    async fn list_tasks(&self, args: &ListTasksArgs) -> Result<()> {
        let tasks = self.tasks();
        let status = args.status();
        match (&args.plant, status) {
            (Some(plant_id), _) => tasks.refresh_for_plant(plant_id).await,
            (None, Some(status)) => tasks.refresh_by_status(status).await,
            (None, None) => tasks.refresh_all().await,
        }

        let state = tasks.state();
        if let Some(error) = state.error {
            bail!("Failed to list tasks: {error}");
        }

        let items = match status {
            Some(status) => state
                .items
                .into_iter()
                .filter(|t| t.completed == status.completed())
                .collect(),
            None => state.items,
        };
        self.renderer
            .render(&format!("# Tasks\n\n{}", Tasks(items)))
    }

    async fn update_task(&self, args: UpdateTaskArgs) -> Result<()> {
        let mut task = self.find_task(&args.id).await?;
        let changes: TaskChanges = args.into();
        if changes.is_empty() {
            bail!("Nothing to update: pass at least one field");
        }

        let summary = describe_task_changes(&changes);
        changes.apply(&mut task);

        let tasks = self.tasks();
        let task = tasks
            .update(task)
            .await
            .ok_or_else(|| failure(tasks.state().error, "Failed to update task"))?;
        self.renderer
            .render(&UpdateResult::with_changes(task, summary).to_string())
    }

    async fn toggle_task(&self, id: &str) -> Result<()> {
        let task = self.find_task(id).await?;
        let tasks = self.tasks();
        let task = tasks
            .toggle(&task.id, &task.plant_id)
            .await
            .ok_or_else(|| failure(tasks.state().error, "Failed to toggle task"))?;

        let change = if task.completed {
            "Marked as done"
        } else {
            "Marked as pending"
        };
        self.renderer
            .render(&UpdateResult::with_changes(task, vec![change.to_string()]).to_string())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        let task = self.find_task(id).await?;
        let tasks = self.tasks();
        if !tasks.remove(&task.id, &task.plant_id).await {
            return Err(failure(tasks.state().error, "Failed to delete task"));
        }
        self.renderer.render(&DeleteResult::new(task).to_string())
    }
}

/// Builds an error from a manager's recorded failure message.
fn failure(recorded: Option<String>, fallback: &str) -> anyhow::Error {
    anyhow!(recorded.unwrap_or_else(|| fallback.to_string()))
}

fn read_photo(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    path.map(|p| fs::read(p).with_context(|| format!("Failed to read photo {}", p.display())))
        .transpose()
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.trim().chars().take(4).collect();
    format!("{prefix}...")
}

fn describe_plant_changes(changes: &PlantChanges) -> Vec<String> {
    [
        ("name", &changes.name),
        ("latin name", &changes.latin_name),
        ("age", &changes.age),
        ("goals", &changes.goals),
        ("other info", &changes.other_info),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("Set {label} to '{v}'")))
    .collect()
}

fn describe_task_changes(changes: &TaskChanges) -> Vec<String> {
    let mut summary = Vec::new();
    if let Some(description) = &changes.description {
        summary.push(format!("Set description to '{description}'"));
    }
    if let Some(date_range) = &changes.date_range {
        summary.push(format!("Set date range to '{date_range}'"));
    }
    match changes.completed {
        Some(true) => summary.push("Marked as done".to_string()),
        Some(false) => summary.push("Marked as pending".to_string()),
        None => {}
    }
    summary
}
