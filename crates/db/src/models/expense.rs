//! Expense row and DTOs.

use bizdesk_core::lifecycle::record::Expense;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{Cents, DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `expenses` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub amount_cents: Cents,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for ExpenseRow {
    type Model = Expense;

    const KIND: RecordKind = RecordKind::Expense;
    const COLUMNS: &'static str =
        "id, project_id, description, amount_cents, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Expense, InvalidLifecycle> {
        Ok(Expense {
            id: self.id,
            project_id: self.project_id,
            description: self.description,
            amount_cents: self.amount_cents,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for recording a new expense.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(min = 0))]
    pub amount_cents: Cents,
}
