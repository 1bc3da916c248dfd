//! Plant view-state manager.
//!
//! [`PlantManager`] keeps an observable list of [`PlantView`]s in sync with
//! storage. Every mutation writes through the [`GardenStore`] and then
//! reloads the full list, so the view state is always a projection of what is
//! persisted rather than something patched in memory.
//!
//! Mutations never return errors. A failure is logged, the list is reloaded,
//! and the message lands in [`ViewState::error`] where a UI can show it.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use garden_core::{params::NewPlant, GardenStoreBuilder, ImageProcessor, PlantManager};
//!
//! # async fn example(images: Arc<dyn ImageProcessor>) -> garden_core::Result<()> {
//! let store = GardenStoreBuilder::new().build()?;
//! let plants = PlantManager::new(store, images);
//!
//! let basil = NewPlant {
//!     name: "Basil".to_string(),
//!     latin_name: "Ocimum basilicum".to_string(),
//!     ..Default::default()
//! };
//! if plants.create(basil, None).await.is_none() {
//!     eprintln!("{}", plants.state().error.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::{debug, error};
use tokio::{sync::watch, task};

use crate::{
    error::{GardenError, Result},
    images::{CompressedImage, ImageProcessor, ObjectUrls},
    models::{Plant, PlantPhoto, PlantView},
    params::NewPlant,
    state::{Observable, ViewState},
    store::GardenStore,
};

/// Owns the plant list a UI renders and orchestrates plant mutations.
pub struct PlantManager {
    store: GardenStore,
    images: Arc<dyn ImageProcessor>,
    urls: ObjectUrls,
    state: Observable<ViewState<PlantView>>,
}

impl PlantManager {
    pub fn new(store: GardenStore, images: Arc<dyn ImageProcessor>) -> Self {
        Self {
            store,
            images,
            urls: ObjectUrls::new(),
            state: Observable::default(),
        }
    }

    /// Uses a shared handle registry instead of a private one.
    pub fn with_object_urls(mut self, urls: ObjectUrls) -> Self {
        self.urls = urls;
        self
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState<PlantView> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<PlantView>> {
        self.state.subscribe()
    }

    /// Registry the thumbnail URLs in the view state resolve against.
    pub fn object_urls(&self) -> &ObjectUrls {
        &self.urls
    }

    /// Reloads every plant together with a display handle for its thumbnail.
    ///
    /// On success the handles of the replaced list are revoked once the new
    /// list is published. On failure the previous list and its handles stay
    /// live and `error` is set.
    pub async fn refresh(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.load_views().await {
            Ok(items) => {
                let mut replaced = Vec::new();
                self.state.update(|s| {
                    replaced = std::mem::replace(&mut s.items, items);
                    s.loading = false;
                });
                let released = self.revoke_all(&replaced);
                if released > 0 {
                    debug!("Released {released} superseded thumbnail handles");
                }
            }
            Err(e) => {
                error!("Failed to load plants: {e}");
                self.state.update(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    async fn load_views(&self) -> Result<Vec<PlantView>> {
        let plants = self.store.list_plants().await?;
        let mut views = Vec::with_capacity(plants.len());

        for plant in plants {
            let photo = match self.store.get_photo(&plant.id).await {
                Ok(photo) => photo,
                Err(e) => {
                    self.revoke_all(&views);
                    return Err(e);
                }
            };

            let thumbnail_url = photo
                .filter(|p| !p.thumbnail.is_empty())
                .map(|p| self.urls.create(p.thumbnail));
            views.push(PlantView {
                plant,
                thumbnail_url,
            });
        }

        Ok(views)
    }

    fn revoke_all(&self, views: &[PlantView]) -> usize {
        views
            .iter()
            .filter_map(|v| v.thumbnail_url.as_deref())
            .filter(|url| self.urls.revoke(url))
            .count()
    }

    /// Records a new plant, with a photo if `image` is given, then reloads.
    ///
    /// Returns the stored plant, or `None` if anything failed.
    pub async fn create(&self, fields: NewPlant, image: Option<Vec<u8>>) -> Option<Plant> {
        if let Err(e) = validate(&fields.name, &fields.latin_name) {
            self.record_failure("Failed to create plant", e);
            return None;
        }

        let plant = Plant::create(fields);
        let outcome = self.write(&plant, image, true).await;
        self.refresh().await;

        match outcome {
            Ok(()) => {
                debug!("Created plant {} ({})", plant.name, plant.id);
                Some(plant)
            }
            Err(e) => {
                self.record_failure("Failed to create plant", e);
                None
            }
        }
    }

    /// Saves changes to a plant, bumping `updated_at`, and optionally
    /// replaces its photo. Reloads afterwards.
    pub async fn update(&self, mut plant: Plant, image: Option<Vec<u8>>) -> Option<Plant> {
        if let Err(e) = validate(&plant.name, &plant.latin_name) {
            self.record_failure("Failed to update plant", e);
            return None;
        }

        plant.touch();
        let outcome = self.write(&plant, image, false).await;
        self.refresh().await;

        match outcome {
            Ok(()) => {
                debug!("Updated plant {}", plant.id);
                Some(plant)
            }
            Err(e) => {
                self.record_failure("Failed to update plant", e);
                None
            }
        }
    }

    async fn write(&self, plant: &Plant, image: Option<Vec<u8>>, is_new: bool) -> Result<()> {
        if is_new {
            self.store.add_plant(plant.clone()).await?;
        } else {
            self.store.update_plant(plant.clone()).await?;
        }

        if let Some(image) = image {
            let CompressedImage {
                full_image,
                thumbnail,
            } = self.compress(image).await?;
            self.store
                .save_photo(PlantPhoto {
                    plant_id: plant.id.clone(),
                    full_image,
                    thumbnail,
                })
                .await?;
        }
        Ok(())
    }

    async fn compress(&self, image: Vec<u8>) -> Result<CompressedImage> {
        let images = Arc::clone(&self.images);
        task::spawn_blocking(move || images.compress(&image))
            .await
            .map_err(|e| GardenError::ImageProcessing {
                message: format!("Failed to process image: {e}"),
            })?
    }

    /// Deletes a plant with its photo and tasks, then reloads.
    ///
    /// Returns whether the delete succeeded. Unknown ids succeed trivially.
    pub async fn remove(&self, id: &str) -> bool {
        let outcome = self.store.delete_plant(id).await;
        self.refresh().await;

        match outcome {
            Ok(()) => {
                debug!("Deleted plant {id}");
                true
            }
            Err(e) => {
                self.record_failure("Failed to delete plant", e);
                false
            }
        }
    }

    pub async fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        self.store.get_plant(id).await
    }

    pub async fn get_photo(&self, plant_id: &str) -> Result<Option<PlantPhoto>> {
        self.store.get_photo(plant_id).await
    }

    /// Revokes every thumbnail handle in the current view state and returns
    /// how many were live.
    ///
    /// [`refresh`](Self::refresh) already releases the handles it replaces;
    /// call this when the list stops being displayed altogether.
    pub fn release_thumbnails(&self) -> usize {
        let state = self.state.get();
        self.revoke_all(&state.items)
    }

    fn record_failure(&self, context: &str, e: GardenError) {
        error!("{context}: {e}");
        let message = e.to_string();
        self.state.update(|s| s.error = Some(message));
    }
}

fn validate(name: &str, latin_name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GardenError::invalid_input("name").with_reason("must not be blank"));
    }
    if latin_name.trim().is_empty() {
        return Err(GardenError::invalid_input("latinName").with_reason("must not be blank"));
    }
    Ok(())
}
