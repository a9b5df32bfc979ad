//! Repository for the `tasks` table.

use bizdesk_core::lifecycle::record::Task;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::task::{CreateTask, TaskRow, UpdateTask};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = TaskRow::COLUMNS;

/// Provides create, read and update operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new open task.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> RepoResult<Task> {
        input.validate()?;

        let query = format!(
            "INSERT INTO tasks (project_id, title)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// Find a task by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List a project's active tasks, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND is_deleted = 0
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an active task. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                done = COALESCE($3, done)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.done)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
