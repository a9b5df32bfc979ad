//! Task row and DTOs.

use bizdesk_core::lifecycle::record::Task;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub done: bool,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for TaskRow {
    type Model = Task;

    const KIND: RecordKind = RecordKind::Task;
    const COLUMNS: &'static str = "id, project_id, title, done, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Task, InvalidLifecycle> {
        Ok(Task {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            done: self.done,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// DTO for updating a task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub done: Option<bool>,
}
