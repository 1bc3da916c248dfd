//! Plant photo model.

use std::fmt;

/// The photo attached to a plant, keyed by the owning plant's id.
///
/// A plant has at most one photo. The full image and thumbnail are always
/// written together.
#[derive(Clone, PartialEq, Eq)]
pub struct PlantPhoto {
    /// ID of the owning plant
    pub plant_id: String,

    /// Compressed full-size image bytes
    pub full_image: Vec<u8>,

    /// Small preview image bytes
    pub thumbnail: Vec<u8>,
}

impl fmt::Debug for PlantPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlantPhoto")
            .field("plant_id", &self.plant_id)
            .field("full_image", &format_args!("{} bytes", self.full_image.len()))
            .field("thumbnail", &format_args!("{} bytes", self.thumbnail.len()))
            .finish()
    }
}
