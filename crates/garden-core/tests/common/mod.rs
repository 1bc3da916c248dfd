#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use garden_core::{
    assistant::{ChatCompletion, ChatMessage},
    CompressedImage, GardenError, GardenStore, GardenStoreBuilder, ImageProcessor,
};
use tempfile::TempDir;

/// Helper function to create a store backed by a fresh database file
pub fn create_test_store() -> (TempDir, GardenStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("garden.db");
    let store = GardenStoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Opens a second raw connection to the store's database file.
pub fn raw_connection(store: &GardenStore) -> rusqlite::Connection {
    let path = store.database_path().expect("store should be file-backed");
    rusqlite::Connection::open(path).expect("Failed to open raw connection")
}

/// Image processor that records how often it runs.
///
/// The "full image" is the source itself and the thumbnail is its first four
/// bytes.
#[derive(Default)]
pub struct FakeImages {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeImages {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageProcessor for FakeImages {
    fn compress(&self, source: &[u8]) -> garden_core::Result<CompressedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GardenError::ImageProcessing {
                message: "Failed to process image".to_string(),
            });
        }
        Ok(CompressedImage {
            full_image: source.to_vec(),
            thumbnail: source.iter().take(4).copied().collect(),
        })
    }
}

/// Chat client that answers every request with the same reply.
pub struct FakeChat {
    reply: String,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatCompletion for FakeChat {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _api_key: &str,
    ) -> garden_core::Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());
        Ok(self.reply.clone())
    }
}
