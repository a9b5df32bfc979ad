//! Repository for the `resources` table.

use bizdesk_core::lifecycle::record::Resource;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::resource::{CreateResource, ResourceRow};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ResourceRow::COLUMNS;

/// Provides create and read operations for project resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Add a resource to a project. Quantity defaults to 1.
    pub async fn create(pool: &PgPool, input: &CreateResource) -> RepoResult<Resource> {
        input.validate()?;

        let query = format!(
            "INSERT INTO resources (project_id, name, quantity)
             VALUES ($1, $2, COALESCE($3, 1))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.quantity)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// List a project's active resources.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM resources
             WHERE project_id = $1 AND is_deleted = 0
             ORDER BY name, id"
        );
        let rows = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }
}
