//! Plant CRUD operations and the cascading delete.

use log::debug;
use rusqlite::{params, OptionalExtension};

use super::{insert_error, timestamp_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::Plant,
};

const PLANT_COLUMNS: &str =
    "id, name, latin_name, age, goals, other_info, created_at, updated_at";
const INSERT_PLANT_SQL: &str = "INSERT INTO plants (id, name, latin_name, age, goals, other_info, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPSERT_PLANT_SQL: &str = "INSERT INTO plants (id, name, latin_name, age, goals, other_info, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(id) DO UPDATE SET
         name = excluded.name,
         latin_name = excluded.latin_name,
         age = excluded.age,
         goals = excluded.goals,
         other_info = excluded.other_info,
         created_at = excluded.created_at,
         updated_at = excluded.updated_at";
const DELETE_PLANT_PHOTO_SQL: &str = "DELETE FROM photos WHERE plant_id = ?1";
const DELETE_PLANT_TASKS_SQL: &str = "DELETE FROM tasks WHERE plant_id = ?1";
const DELETE_PLANT_SQL: &str = "DELETE FROM plants WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Plant from a database row
    fn build_plant_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plant> {
        Ok(Plant {
            id: row.get(0)?,
            name: row.get(1)?,
            latin_name: row.get(2)?,
            age: row.get(3)?,
            goals: row.get(4)?,
            other_info: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
        })
    }

    /// Lists every plant, oldest first (ascending `created_at`).
    pub fn list_plants(&self) -> Result<Vec<Plant>> {
        let query = format!("SELECT {PLANT_COLUMNS} FROM plants ORDER BY created_at ASC, rowid ASC");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let result = stmt.query_map([], Self::build_plant_from_row)
            .db_context("Failed to query plants")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plants");
        result
    }

    /// Retrieves a plant by its ID.
    pub fn get_plant(&self, id: &str) -> Result<Option<Plant>> {
        let query = format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = ?1");
        self.connection
            .query_row(&query, params![id], Self::build_plant_from_row)
            .optional()
            .db_context("Failed to query plant")
    }

    /// Inserts a new plant. Fails with
    /// [`GardenError::DuplicateKey`] if a plant with the same id exists; the
    /// existing record is left unchanged.
    pub fn add_plant(&mut self, plant: &Plant) -> Result<()> {
        self.connection
            .execute(
                INSERT_PLANT_SQL,
                params![
                    plant.id,
                    plant.name,
                    plant.latin_name,
                    plant.age,
                    plant.goals,
                    plant.other_info,
                    plant.created_at.as_millisecond(),
                    plant.updated_at.as_millisecond(),
                ],
            )
            .map_err(|e| insert_error(e, "plants", &plant.id, "Failed to insert plant"))?;
        Ok(())
    }

    /// Inserts or replaces a plant keyed by id.
    pub fn update_plant(&mut self, plant: &Plant) -> Result<()> {
        self.connection
            .execute(
                UPSERT_PLANT_SQL,
                params![
                    plant.id,
                    plant.name,
                    plant.latin_name,
                    plant.age,
                    plant.goals,
                    plant.other_info,
                    plant.created_at.as_millisecond(),
                    plant.updated_at.as_millisecond(),
                ],
            )
            .db_context("Failed to update plant")?;
        Ok(())
    }

    /// Permanently deletes a plant together with its photo and all of its
    /// tasks, in one transaction. Either all three are removed or none are.
    ///
    /// Deleting an id that does not exist is not an error.
    pub fn delete_plant(&mut self, id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_PLANT_PHOTO_SQL, params![id])
            .map_err(|e| GardenError::database_error("Failed to delete plant photo", e))?;

        let removed_tasks = tx
            .execute(DELETE_PLANT_TASKS_SQL, params![id])
            .map_err(|e| GardenError::database_error("Failed to delete plant tasks", e))?;

        tx.execute(DELETE_PLANT_SQL, params![id])
            .map_err(|e| GardenError::database_error("Failed to delete plant", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted plant {id} and {removed_tasks} task(s)");
        Ok(())
    }
}
