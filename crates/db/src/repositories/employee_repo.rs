//! Repository for `employees`, their permissions and their tool assignments.

use bizdesk_core::lifecycle::record::{Employee, EmployeePermission, ToolAssignment};
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::employee::{
    CreateEmployee, EmployeePermissionRow, EmployeeRow, GrantPermission, UpdateEmployee,
};
use crate::models::tool::ToolAssignmentRow;
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = EmployeeRow::COLUMNS;
const PERMISSION_COLUMNS: &str = EmployeePermissionRow::COLUMNS;
const ASSIGNMENT_COLUMNS: &str = ToolAssignmentRow::COLUMNS;

/// Provides CRUD-style operations for employees. Employees have no trash;
/// removal is a hard delete through the lifecycle engine.
pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> RepoResult<Employee> {
        input.validate()?;

        let query = format!(
            "INSERT INTO employees (name, email)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY name, id");
        let rows = sqlx::query_as::<_, EmployeeRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an employee. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = COALESCE($2, name),
                email = COALESCE($3, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    // -----------------------------------------------------------------------
    // Permissions
    // -----------------------------------------------------------------------

    /// Grant a permission. Granting one the employee already holds is a
    /// no-op and returns the existing row.
    pub async fn grant_permission(
        pool: &PgPool,
        employee_id: DbId,
        input: &GrantPermission,
    ) -> RepoResult<EmployeePermission> {
        input.validate()?;

        let query = format!(
            "INSERT INTO employee_permissions (employee_id, permission)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_employee_permissions_employee_permission
             DO UPDATE SET permission = EXCLUDED.permission
             RETURNING {PERMISSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EmployeePermissionRow>(&query)
            .bind(employee_id)
            .bind(&input.permission)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    pub async fn list_permissions(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<EmployeePermission>, sqlx::Error> {
        let query = format!(
            "SELECT {PERMISSION_COLUMNS} FROM employee_permissions
             WHERE employee_id = $1
             ORDER BY permission"
        );
        let rows = sqlx::query_as::<_, EmployeePermissionRow>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    // -----------------------------------------------------------------------
    // Tool assignments
    // -----------------------------------------------------------------------

    pub async fn list_tools(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<ToolAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM tool_assignments
             WHERE employee_id = $1
             ORDER BY tool_id"
        );
        let rows = sqlx::query_as::<_, ToolAssignmentRow>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Replace the set of tools assigned to an employee.
    ///
    /// Deletes existing assignments, then inserts the new set.
    pub async fn replace_tools(
        pool: &PgPool,
        employee_id: DbId,
        tool_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM tool_assignments WHERE employee_id = $1")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        for tool_id in tool_ids {
            sqlx::query(
                "INSERT INTO tool_assignments (tool_id, employee_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(tool_id)
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
