//! Repository for the `expenses` table.

use bizdesk_core::lifecycle::record::Expense;
use bizdesk_core::types::{Cents, DbId};
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::expense::{CreateExpense, ExpenseRow};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ExpenseRow::COLUMNS;

/// Provides create and read operations for expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Record a new expense.
    pub async fn create(pool: &PgPool, input: &CreateExpense) -> RepoResult<Expense> {
        input.validate()?;

        let query = format!(
            "INSERT INTO expenses (project_id, description, amount_cents)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ExpenseRow>(&query)
            .bind(input.project_id)
            .bind(&input.description)
            .bind(input.amount_cents)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// List a project's active expenses.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses
             WHERE project_id = $1 AND is_deleted = 0
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, ExpenseRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Sum of a project's active expenses, in cents.
    pub async fn total_for_project(pool: &PgPool, project_id: DbId) -> Result<Cents, sqlx::Error> {
        let total: (Cents,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM expenses
             WHERE project_id = $1 AND is_deleted = 0",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(total.0)
    }
}
