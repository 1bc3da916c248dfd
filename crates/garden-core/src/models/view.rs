//! Presentation-ready projections of stored records.

use serde::Serialize;

use super::Plant;

/// A plant joined with a display handle for its thumbnail, if it has one.
///
/// The `thumbnail_url` is issued by [`crate::images::ObjectUrls`] and stays
/// resolvable until it is revoked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlantView {
    #[serde(flatten)]
    pub plant: Plant,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PlantView {
    /// The id of the underlying plant.
    pub fn id(&self) -> &str {
        &self.plant.id
    }
}
