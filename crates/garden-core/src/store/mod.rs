//! Async facade over the storage engine.
//!
//! [`GardenStore`] is the handle the view-state managers talk to. It is cheap
//! to clone; every clone shares one lazily opened database connection that
//! lives for as long as any clone does. The schema is initialized the first
//! time an operation needs the database, not when the store is built.
//!
//! Each operation runs on the blocking thread pool and holds the connection
//! for its whole duration, so multi-statement operations such as
//! [`GardenStore::delete_plant`] are never interleaved with other writes.
//!
//! # Example
//!
//! ```rust,no_run
//! use garden_core::{models::Plant, params::NewPlant, GardenStoreBuilder};
//!
//! # async fn example() -> garden_core::Result<()> {
//! let store = GardenStoreBuilder::new()
//!     .with_database_path(Some("garden.db"))
//!     .build()?;
//!
//! let plant = Plant::create(NewPlant {
//!     name: "Rosemary".to_string(),
//!     latin_name: "Salvia rosmarinus".to_string(),
//!     ..Default::default()
//! });
//! store.add_plant(plant.clone()).await?;
//! assert_eq!(store.get_plant(&plant.id).await?, Some(plant));
//! # Ok(())
//! # }
//! ```

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use log::debug;
use tokio::{sync::OnceCell, task};

use crate::{
    db::Database,
    error::{GardenError, Result},
    models::{Plant, PlantPhoto, Task},
};

pub mod builder;

pub use builder::GardenStoreBuilder;

/// Where the database lives.
#[derive(Debug, Clone)]
pub(crate) enum Location {
    File(PathBuf),
    Memory,
}

impl Location {
    fn open(&self) -> Result<Database> {
        match self {
            Location::File(path) => Database::new(path),
            Location::Memory => Database::in_memory(),
        }
    }
}

struct Inner {
    location: Location,
    handle: OnceCell<Arc<Mutex<Database>>>,
}

/// Shared, lazily opened handle to the garden database.
#[derive(Clone)]
pub struct GardenStore {
    inner: Arc<Inner>,
}

fn join_error(e: task::JoinError) -> GardenError {
    GardenError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

impl GardenStore {
    pub(crate) fn new(location: Location) -> Self {
        Self {
            inner: Arc::new(Inner {
                location,
                handle: OnceCell::new(),
            }),
        }
    }

    /// The database file backing this store, if it is not in-memory.
    pub fn database_path(&self) -> Option<&std::path::Path> {
        match &self.inner.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Opens the database on first use and returns the cached handle.
    async fn handle(&self) -> Result<Arc<Mutex<Database>>> {
        self.inner
            .handle
            .get_or_try_init(|| async {
                let location = self.inner.location.clone();
                debug!("Opening garden database at {location:?}");
                let db = task::spawn_blocking(move || location.open())
                    .await
                    .map_err(join_error)??;
                Ok::<_, GardenError>(Arc::new(Mutex::new(db)))
            })
            .await
            .cloned()
    }

    /// Runs `op` against the database on the blocking pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = self.handle().await?;
        task::spawn_blocking(move || {
            let mut db = handle.lock().map_err(|_| GardenError::Configuration {
                message: "Database connection lock poisoned".to_string(),
            })?;
            op(&mut db)
        })
        .await
        .map_err(join_error)?
    }

    /// Returns the schema version stored in the database.
    pub async fn schema_version(&self) -> Result<i64> {
        self.with_db(|db| db.schema_version()).await
    }

    // Plants

    /// Lists all plants in ascending creation order.
    pub async fn list_plants(&self) -> Result<Vec<Plant>> {
        self.with_db(|db| db.list_plants()).await
    }

    /// Retrieves a plant by its ID.
    pub async fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_plant(&id)).await
    }

    /// Inserts a new plant; fails with `DuplicateKey` if the id exists.
    pub async fn add_plant(&self, plant: Plant) -> Result<()> {
        self.with_db(move |db| db.add_plant(&plant)).await
    }

    /// Inserts or replaces a plant.
    pub async fn update_plant(&self, plant: Plant) -> Result<()> {
        self.with_db(move |db| db.update_plant(&plant)).await
    }

    /// Deletes a plant, its photo and its tasks atomically.
    pub async fn delete_plant(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.with_db(move |db| db.delete_plant(&id)).await
    }

    // Photos

    /// Retrieves the photo of a plant.
    pub async fn get_photo(&self, plant_id: &str) -> Result<Option<PlantPhoto>> {
        let plant_id = plant_id.to_string();
        self.with_db(move |db| db.get_photo(&plant_id)).await
    }

    /// Saves (or replaces) a plant's photo.
    pub async fn save_photo(&self, photo: PlantPhoto) -> Result<()> {
        self.with_db(move |db| db.save_photo(&photo)).await
    }

    /// Removes a plant's photo.
    pub async fn delete_photo(&self, plant_id: &str) -> Result<()> {
        let plant_id = plant_id.to_string();
        self.with_db(move |db| db.delete_photo(&plant_id)).await
    }

    // Tasks

    /// Lists all tasks in ascending creation order.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.with_db(|db| db.list_tasks()).await
    }

    /// Lists the tasks of one plant.
    pub async fn list_tasks_for_plant(&self, plant_id: &str) -> Result<Vec<Task>> {
        let plant_id = plant_id.to_string();
        self.with_db(move |db| db.list_tasks_for_plant(&plant_id))
            .await
    }

    /// Lists tasks that are (or are not) completed.
    pub async fn list_tasks_by_status(&self, completed: bool) -> Result<Vec<Task>> {
        self.with_db(move |db| db.list_tasks_by_status(completed))
            .await
    }

    /// Retrieves a task by its ID.
    pub async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_task(&id)).await
    }

    /// Inserts a new task; fails with `DuplicateKey` if the id exists.
    pub async fn add_task(&self, task: Task) -> Result<()> {
        self.with_db(move |db| db.add_task(&task)).await
    }

    /// Inserts or replaces a task.
    pub async fn update_task(&self, task: Task) -> Result<()> {
        self.with_db(move |db| db.update_task(&task)).await
    }

    /// Removes a task.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.with_db(move |db| db.delete_task(&id)).await
    }

    /// Removes all tasks of a plant in one transaction.
    pub async fn delete_tasks_for_plant(&self, plant_id: &str) -> Result<usize> {
        let plant_id = plant_id.to_string();
        self.with_db(move |db| db.delete_tasks_for_plant(&plant_id))
            .await
    }

    /// Flips a task's completion flag. Absent tasks are a silent no-op and
    /// yield `None`.
    pub async fn toggle_task_completion(&self, id: &str) -> Result<Option<Task>> {
        let id = id.to_string();
        self.with_db(move |db| db.toggle_task_completion(&id))
            .await
    }
}
