//! Repository for the `projects` table.

use bizdesk_core::lifecycle::record::Project;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::project::{CreateProject, ProjectRow, UpdateProject};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ProjectRow::COLUMNS;

/// Provides create, read and update operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project under an active client.
    ///
    /// The client row is share-locked for the insert, so a concurrent
    /// client delete either sees this project in its guard count or runs
    /// first and makes this call return `None`. Returns `None` if the client
    /// is missing or deleted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
    ) -> RepoResult<Option<Project>> {
        input.validate()?;

        let mut tx = pool.begin().await?;

        let client: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM clients WHERE id = $1 AND is_deleted = 0 FOR SHARE")
                .bind(input.client_id)
                .fetch_optional(&mut *tx)
                .await?;
        if client.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO projects (client_id, name, description, budget_cents)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget_cents)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(decode(row)?))
    }

    /// Find a project by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Find a project by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List active projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE is_deleted = 0 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// List a client's active projects.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE client_id = $1 AND is_deleted = 0
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an active project. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                budget_cents = COALESCE($4, budget_cents)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget_cents)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
