//! Core library for the garden plant-care tracker.
//!
//! The crate is layered the same way data flows through it:
//!
//! - **Storage engine** ([`db`]): plants, their photos and their care tasks in
//!   SQLite, with index-backed queries and transactional cascade deletes.
//! - **Store facade** ([`store`]): an async, cloneable handle that opens the
//!   database lazily and runs every query on the blocking pool.
//! - **View-state managers** ([`plants`], [`tasks`]): derive ids and
//!   timestamps, write through the store, then reload an observable
//!   `{items, loading, error}` projection ([`state`]).
//! - **Collaborators**: photo compression behind [`ImageProcessor`] and the
//!   chat-completion service behind [`assistant::ChatCompletion`].
//! - **Settings** ([`settings`]): a small JSON settings object holding the API
//!   key.
//!
//! Presentation lives in [`display`], which renders records as markdown.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use garden_core::{
//!     params::{NewPlant, NewTask},
//!     GardenStoreBuilder, ImageProcessor, PlantManager, TaskManager,
//! };
//!
//! # async fn example(images: Arc<dyn ImageProcessor>) -> garden_core::Result<()> {
//! let store = GardenStoreBuilder::new()
//!     .with_database_path(Some("garden.db"))
//!     .build()?;
//!
//! let plants = PlantManager::new(store.clone(), images);
//! let tasks = TaskManager::new(store);
//!
//! let Some(basil) = plants
//!     .create(
//!         NewPlant {
//!             name: "Basil".to_string(),
//!             latin_name: "Ocimum basilicum".to_string(),
//!             ..Default::default()
//!         },
//!         None,
//!     )
//!     .await
//! else {
//!     return Ok(());
//! };
//!
//! tasks
//!     .create(NewTask {
//!         plant_id: basil.id.clone(),
//!         description: "Pinch off flower buds".to_string(),
//!         date_range: "01.06 - 31.08".to_string(),
//!         completed: false,
//!     })
//!     .await;
//!
//! for task in tasks.tasks_for_plant(&basil.id) {
//!     println!("{task}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod db;
pub mod display;
pub mod error;
pub mod images;
pub mod models;
pub mod params;
pub mod plants;
pub mod settings;
pub mod state;
pub mod store;
pub mod tasks;

// Re-export commonly used types
pub use db::Database;
pub use error::{GardenError, Result};
pub use images::{CompressedImage, ImageProcessor, ObjectUrls};
pub use plants::PlantManager;
pub use settings::{Settings, SettingsPatch, SettingsStore};
pub use state::{Observable, ViewState};
pub use store::{GardenStore, GardenStoreBuilder};
pub use tasks::TaskManager;
