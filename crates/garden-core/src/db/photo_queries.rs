//! Photo reads and writes, keyed by plant id.

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::PlantPhoto,
};

const SELECT_PHOTO_SQL: &str =
    "SELECT plant_id, full_image, thumbnail FROM photos WHERE plant_id = ?1";
const UPSERT_PHOTO_SQL: &str = "INSERT INTO photos (plant_id, full_image, thumbnail) VALUES (?1, ?2, ?3)
     ON CONFLICT(plant_id) DO UPDATE SET
         full_image = excluded.full_image,
         thumbnail = excluded.thumbnail";
const DELETE_PHOTO_SQL: &str = "DELETE FROM photos WHERE plant_id = ?1";

impl super::Database {
    /// Retrieves the photo for a plant, if one was saved.
    pub fn get_photo(&self, plant_id: &str) -> Result<Option<PlantPhoto>> {
        self.connection
            .query_row(SELECT_PHOTO_SQL, params![plant_id], |row| {
                Ok(PlantPhoto {
                    plant_id: row.get(0)?,
                    full_image: row.get(1)?,
                    thumbnail: row.get(2)?,
                })
            })
            .optional()
            .db_context("Failed to query photo")
    }

    /// Saves a plant's photo, replacing both images if one already exists.
    pub fn save_photo(&mut self, photo: &PlantPhoto) -> Result<()> {
        self.connection
            .execute(
                UPSERT_PHOTO_SQL,
                params![photo.plant_id, photo.full_image, photo.thumbnail],
            )
            .db_context("Failed to save photo")?;
        Ok(())
    }

    /// Removes a plant's photo. Missing photos are ignored.
    pub fn delete_photo(&mut self, plant_id: &str) -> Result<()> {
        self.connection
            .execute(DELETE_PHOTO_SQL, params![plant_id])
            .db_context("Failed to delete photo")?;
        Ok(())
    }
}
