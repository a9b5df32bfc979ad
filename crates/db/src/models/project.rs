//! Project row and DTOs.

use bizdesk_core::lifecycle::record::Project;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{Cents, DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub budget_cents: Option<Cents>,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for ProjectRow {
    type Model = Project;

    const KIND: RecordKind = RecordKind::Project;
    const COLUMNS: &'static str =
        "id, client_id, name, description, budget_cents, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Project, InvalidLifecycle> {
        Ok(Project {
            id: self.id,
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            budget_cents: self.budget_cents,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new project. The client must exist and be active.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub client_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub budget_cents: Option<Cents>,
}

/// DTO for updating a project. The owning client cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub budget_cents: Option<Cents>,
}
