//! Display formatting for records and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "Created plant with ID" or an empty
//! list message. Everything renders as markdown so the CLI can hand it to its
//! terminal renderer.
//!
//! ```rust
//! use garden_core::{display::CreateResult, models::Plant, params::NewPlant};
//!
//! let plant = Plant::create(NewPlant {
//!     name: "Lavender".to_string(),
//!     latin_name: "Lavandula angustifolia".to_string(),
//!     ..Default::default()
//! });
//!
//! let output = CreateResult::new(plant.clone()).to_string();
//! assert!(output.contains(&format!("Created plant with ID: {}", plant.id)));
//! assert!(output.contains("## Lavender (Lavandula angustifolia)"));
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: list wrappers ([`Plants`], [`Tasks`])
//! - [`results`]: operation results ([`CreateResult`], [`UpdateResult`],
//!   [`DeleteResult`])
//! - [`datetime`]: local time formatting
//! - [`models`]: `Display` for [`crate::models::Plant`],
//!   [`crate::models::PlantView`] and [`crate::models::Task`]

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Plants, Tasks};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
