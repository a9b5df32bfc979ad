//! Repository for the `tools` table.

use bizdesk_core::lifecycle::record::{Tool, ToolAssignment};
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::tool::{CreateTool, ToolAssignmentRow, ToolRow, UpdateTool};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ToolRow::COLUMNS;
const ASSIGNMENT_COLUMNS: &str = ToolAssignmentRow::COLUMNS;

/// Provides create, read and update operations for tools.
pub struct ToolRepo;

impl ToolRepo {
    /// Register a tool. A duplicate QR code violates `uq_tools_qr_code`.
    pub async fn create(pool: &PgPool, input: &CreateTool) -> RepoResult<Tool> {
        input.validate()?;

        let query = format!(
            "INSERT INTO tools (name, serial_number, qr_code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ToolRow>(&query)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(&input.qr_code)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE id = $1");
        sqlx::query_as::<_, ToolRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Look a tool up by the code printed on its label.
    pub async fn find_by_qr_code(pool: &PgPool, qr_code: &str) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools WHERE qr_code = $1");
        sqlx::query_as::<_, ToolRow>(&query)
            .bind(qr_code)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Tool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tools ORDER BY name, id");
        let rows = sqlx::query_as::<_, ToolRow>(&query).fetch_all(pool).await?;
        decode_all(rows)
    }

    /// Update a tool. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTool,
    ) -> Result<Option<Tool>, sqlx::Error> {
        let query = format!(
            "UPDATE tools SET
                name = COALESCE($2, name),
                serial_number = COALESCE($3, serial_number),
                qr_code = COALESCE($4, qr_code)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ToolRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(&input.qr_code)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Employees currently holding the tool.
    pub async fn list_assignments(
        pool: &PgPool,
        tool_id: DbId,
    ) -> Result<Vec<ToolAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM tool_assignments
             WHERE tool_id = $1
             ORDER BY employee_id"
        );
        let rows = sqlx::query_as::<_, ToolAssignmentRow>(&query)
            .bind(tool_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }
}
