//! Resource row and DTOs.

use bizdesk_core::lifecycle::record::Resource;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResourceRow {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub quantity: i32,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for ResourceRow {
    type Model = Resource;

    const KIND: RecordKind = RecordKind::Resource;
    const COLUMNS: &'static str =
        "id, project_id, name, quantity, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Resource, InvalidLifecycle> {
        Ok(Resource {
            id: self.id,
            project_id: self.project_id,
            name: self.name,
            quantity: self.quantity,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for adding a resource to a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResource {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}
