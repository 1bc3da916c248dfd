//! Task view-state manager.
//!
//! [`TaskManager`] mirrors [`crate::PlantManager`]: mutations write through
//! the store, reload the tasks of the affected plant (newest first), and
//! report failures through [`ViewState::error`] instead of returning them.

use log::{debug, error};
use tokio::sync::watch;

use crate::{
    error::{GardenError, Result},
    models::{timestamps, Task},
    params::{NewTask, TaskStatus},
    state::{Observable, ViewState},
    store::GardenStore,
};

/// Owns the task list a UI renders and orchestrates task mutations.
pub struct TaskManager {
    store: GardenStore,
    state: Observable<ViewState<Task>>,
}

impl TaskManager {
    pub fn new(store: GardenStore) -> Self {
        Self {
            store,
            state: Observable::default(),
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState<Task> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Task>> {
        self.state.subscribe()
    }

    /// Loads every task.
    pub async fn refresh_all(&self) {
        self.load(self.store.list_tasks()).await;
    }

    /// Loads the tasks of one plant.
    pub async fn refresh_for_plant(&self, plant_id: &str) {
        self.load(self.store.list_tasks_for_plant(plant_id)).await;
    }

    /// Loads every task that is pending or completed.
    pub async fn refresh_by_status(&self, status: TaskStatus) {
        self.load(self.store.list_tasks_by_status(status.completed()))
            .await;
    }

    async fn load(&self, query: impl std::future::Future<Output = Result<Vec<Task>>>) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match query.await {
            Ok(mut tasks) => {
                sort_newest_first(&mut tasks);
                self.state.update(|s| {
                    s.items = tasks;
                    s.loading = false;
                });
            }
            Err(e) => {
                error!("Failed to load tasks: {e}");
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Creates a task and reloads its plant's tasks.
    pub async fn create(&self, fields: NewTask) -> Option<Task> {
        if let Err(e) = validate(&fields) {
            self.record_failure("Failed to create task", e);
            return None;
        }

        let task = Task::create(fields);
        let outcome = self.store.add_task(task.clone()).await;
        self.refresh_for_plant(&task.plant_id).await;

        match outcome {
            Ok(()) => {
                debug!("Created task {} for plant {}", task.id, task.plant_id);
                Some(task)
            }
            Err(e) => {
                self.record_failure("Failed to create task", e);
                None
            }
        }
    }

    /// Creates several tasks one write at a time, then reloads the tasks of
    /// the first item's plant.
    ///
    /// Writing stops at the first failure; tasks written before it stay
    /// stored. Returns the tasks that were written. An empty input does
    /// nothing at all and publishes no state change.
    pub async fn create_many(&self, fields: Vec<NewTask>) -> Vec<Task> {
        let Some(plant_id) = fields.first().map(|f| f.plant_id.clone()) else {
            return Vec::new();
        };

        let now = timestamps::now();
        let mut created = Vec::with_capacity(fields.len());
        let mut failure = None;

        for item in fields {
            if let Err(e) = validate(&item) {
                failure = Some(e);
                break;
            }
            let task = Task::create_at(item, now);
            if let Err(e) = self.store.add_task(task.clone()).await {
                failure = Some(e);
                break;
            }
            created.push(task);
        }

        self.refresh_for_plant(&plant_id).await;

        if let Some(e) = failure {
            self.record_failure("Failed to create tasks", e);
        } else {
            debug!("Created {} tasks for plant {plant_id}", created.len());
        }
        created
    }

    /// Saves changes to a task, bumping `updated_at`, and reloads its plant's
    /// tasks.
    pub async fn update(&self, mut task: Task) -> Option<Task> {
        task.touch();
        let outcome = self.store.update_task(task.clone()).await;
        self.refresh_for_plant(&task.plant_id).await;

        match outcome {
            Ok(()) => {
                debug!("Updated task {}", task.id);
                Some(task)
            }
            Err(e) => {
                self.record_failure("Failed to update task", e);
                None
            }
        }
    }

    /// Deletes a task and reloads the tasks of `plant_id`.
    pub async fn remove(&self, id: &str, plant_id: &str) -> bool {
        let outcome = self.store.delete_task(id).await;
        self.refresh_for_plant(plant_id).await;

        match outcome {
            Ok(()) => {
                debug!("Deleted task {id}");
                true
            }
            Err(e) => {
                self.record_failure("Failed to delete task", e);
                false
            }
        }
    }

    /// Flips a task's completion and reloads the tasks of `plant_id`.
    ///
    /// Returns the toggled task, or `None` if it does not exist or the write
    /// failed.
    pub async fn toggle(&self, id: &str, plant_id: &str) -> Option<Task> {
        let outcome = self.store.toggle_task_completion(id).await;
        self.refresh_for_plant(plant_id).await;

        match outcome {
            Ok(task) => task,
            Err(e) => {
                self.record_failure("Failed to toggle task", e);
                None
            }
        }
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        self.store.get_task(id).await
    }

    /// Tasks of one plant from the last loaded list. Does not touch storage.
    pub fn tasks_for_plant(&self, plant_id: &str) -> Vec<Task> {
        self.state
            .get()
            .items
            .into_iter()
            .filter(|t| t.plant_id == plant_id)
            .collect()
    }

    fn record_failure(&self, context: &str, e: GardenError) {
        error!("{context}: {e}");
        let message = e.to_string();
        self.state.update(|s| s.error = Some(message));
    }
}

fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn validate(fields: &NewTask) -> Result<()> {
    if fields.plant_id.trim().is_empty() {
        return Err(GardenError::invalid_input("plantId").with_reason("must not be blank"));
    }
    if fields.description.trim().is_empty() {
        return Err(GardenError::invalid_input("description").with_reason("must not be blank"));
    }
    Ok(())
}
