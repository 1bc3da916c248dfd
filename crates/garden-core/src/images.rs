//! Photo collaborator and display handles.
//!
//! Compression itself is not done here. [`ImageProcessor`] is the seam: the
//! CLI plugs in a JPEG encoder and tests plug in fakes. [`ObjectUrls`] hands
//! out revocable string handles over thumbnail bytes so view state can carry
//! something displayable without cloning blobs around.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::error::Result;

/// Output of an [`ImageProcessor`]: a display-size image and a thumbnail.
#[derive(Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub full_image: Vec<u8>,
    pub thumbnail: Vec<u8>,
}

impl std::fmt::Debug for CompressedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressedImage")
            .field("full_image", &format_args!("{} bytes", self.full_image.len()))
            .field("thumbnail", &format_args!("{} bytes", self.thumbnail.len()))
            .finish()
    }
}

/// Turns an uploaded image into the two blobs stored with a plant.
///
/// Implementations are called from the blocking thread pool and may take
/// their time. On failure they return [`crate::GardenError::ImageProcessing`].
pub trait ImageProcessor: Send + Sync {
    fn compress(&self, source: &[u8]) -> Result<CompressedImage>;
}

const URL_PREFIX: &str = "blob:garden/";

/// Registry of displayable handles over in-memory image bytes.
///
/// Clones share the same registry. A handle stays resolvable until it is
/// revoked; nothing is released automatically.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrls {
    entries: Arc<Mutex<HashMap<String, Arc<[u8]>>>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<[u8]>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `bytes` and returns a fresh `blob:garden/<uuid>` handle.
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>) -> String {
        let url = format!("{URL_PREFIX}{}", uuid::Uuid::new_v4());
        self.entries().insert(url.clone(), bytes.into());
        url
    }

    /// Returns the bytes behind a live handle.
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.entries().get(url).cloned()
    }

    /// Releases a handle. Returns `false` if it was unknown or already revoked.
    pub fn revoke(&self, url: &str) -> bool {
        self.entries().remove(url).is_some()
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
