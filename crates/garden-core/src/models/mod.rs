//! Data models for plants, their photos and care tasks.
//!
//! These are the records owned by the storage engine. Display
//! implementations live in [`crate::display::models`] so that presentation
//! stays separate from the data structures.
//!
//! Every record carries `created_at`/`updated_at` timestamps at millisecond
//! precision, matching what the storage engine persists. Use
//! [`timestamps::now`] and [`timestamps::advance`] rather than
//! [`jiff::Timestamp::now`] so that a record read back from storage compares
//! equal to the one that was written.
//!
//! # Examples
//!
//! ```rust
//! use garden_core::{models::Plant, params::NewPlant};
//!
//! let plant = Plant::create(NewPlant {
//!     name: "Basil".to_string(),
//!     latin_name: "Ocimum basilicum".to_string(),
//!     ..Default::default()
//! });
//! assert_eq!(plant.created_at, plant.updated_at);
//! println!("{}", plant);
//! ```

pub mod photo;
pub mod plant;
pub mod task;
pub mod timestamps;
pub mod view;


pub use photo::PlantPhoto;
pub use plant::Plant;
pub use task::Task;
pub use view::PlantView;

/// Generates a fresh record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
