//! Task CRUD operations and queries.

use rusqlite::{params, OptionalExtension};

use super::{insert_error, timestamp_column};
use crate::{
    error::{DatabaseResultExt, GardenError, Result},
    models::Task,
};

const TASK_COLUMNS: &str =
    "id, plant_id, description, date_range, completed, created_at, updated_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (id, plant_id, description, date_range, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPSERT_TASK_SQL: &str = "INSERT INTO tasks (id, plant_id, description, date_range, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(id) DO UPDATE SET
         plant_id = excluded.plant_id,
         description = excluded.description,
         date_range = excluded.date_range,
         completed = excluded.completed,
         created_at = excluded.created_at,
         updated_at = excluded.updated_at";
const UPDATE_TASK_COMPLETION_SQL: &str =
    "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_TASKS_BY_PLANT_SQL: &str = "DELETE FROM tasks WHERE plant_id = ?1";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            plant_id: row.get(1)?,
            description: row.get(2)?,
            date_range: row.get(3)?,
            completed: row.get(4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
        })
    }

    fn query_tasks(&self, query: &str, args: impl rusqlite::Params) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(query)
            .db_context("Failed to prepare query")?;

        let result = stmt.query_map(args, Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks");
        result
    }

    /// Lists every task, oldest first (ascending `created_at`).
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.query_tasks(
            &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC, rowid ASC"),
            [],
        )
    }

    /// Lists the tasks of one plant via the `plant_id` index. Rows come back
    /// in index order; callers sort as needed.
    pub fn list_tasks_for_plant(&self, plant_id: &str) -> Result<Vec<Task>> {
        self.query_tasks(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE plant_id = ?1"),
            params![plant_id],
        )
    }

    /// Lists tasks by completion state via the `completed` index, oldest
    /// first.
    pub fn list_tasks_by_status(&self, completed: bool) -> Result<Vec<Task>> {
        self.query_tasks(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE completed = ?1 ORDER BY created_at ASC, rowid ASC"
            ),
            params![completed],
        )
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        self.connection
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to query task")
    }

    /// Inserts a new task. Fails with [`GardenError::DuplicateKey`] if the id
    /// is taken.
    pub fn add_task(&mut self, task: &Task) -> Result<()> {
        self.connection
            .execute(
                INSERT_TASK_SQL,
                params![
                    task.id,
                    task.plant_id,
                    task.description,
                    task.date_range,
                    task.completed,
                    task.created_at.as_millisecond(),
                    task.updated_at.as_millisecond(),
                ],
            )
            .map_err(|e| insert_error(e, "tasks", &task.id, "Failed to insert task"))?;
        Ok(())
    }

    /// Inserts or replaces a task keyed by id.
    pub fn update_task(&mut self, task: &Task) -> Result<()> {
        self.connection
            .execute(
                UPSERT_TASK_SQL,
                params![
                    task.id,
                    task.plant_id,
                    task.description,
                    task.date_range,
                    task.completed,
                    task.created_at.as_millisecond(),
                    task.updated_at.as_millisecond(),
                ],
            )
            .db_context("Failed to update task")?;
        Ok(())
    }

    /// Removes a task. Missing ids are ignored.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        self.connection
            .execute(DELETE_TASK_SQL, params![id])
            .db_context("Failed to delete task")?;
        Ok(())
    }

    /// Removes every task of a plant in one transaction and returns how many
    /// were deleted.
    pub fn delete_tasks_for_plant(&mut self, plant_id: &str) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let removed = tx
            .execute(DELETE_TASKS_BY_PLANT_SQL, params![plant_id])
            .map_err(|e| GardenError::database_error("Failed to delete plant tasks", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(removed)
    }

    /// Flips a task's completion flag and bumps its `updated_at`.
    ///
    /// Returns the updated task, or `None` without writing anything when the
    /// task does not exist.
    pub fn toggle_task_completion(&mut self, id: &str) -> Result<Option<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let task = tx
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to query task")?;

        let Some(mut task) = task else {
            return Ok(None);
        };

        task.toggle();
        tx.execute(
            UPDATE_TASK_COMPLETION_SQL,
            params![task.completed, task.updated_at.as_millisecond(), task.id],
        )
        .map_err(|e| GardenError::database_error("Failed to toggle task", e))?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(task))
    }
}
