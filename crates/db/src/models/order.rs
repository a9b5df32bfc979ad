//! Order row and DTOs.

use bizdesk_core::lifecycle::record::Order;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{Cents, DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: DbId,
    pub project_id: DbId,
    pub supplier_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub title: String,
    pub amount_cents: Option<Cents>,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for OrderRow {
    type Model = Order;

    const KIND: RecordKind = RecordKind::Order;
    const COLUMNS: &'static str = "id, project_id, supplier_id, task_id, title, amount_cents, \
                                   is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Order, InvalidLifecycle> {
        Ok(Order {
            id: self.id,
            project_id: self.project_id,
            supplier_id: self.supplier_id,
            task_id: self.task_id,
            title: self.title,
            amount_cents: self.amount_cents,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrder {
    pub project_id: DbId,
    pub supplier_id: Option<DbId>,
    pub task_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 0))]
    pub amount_cents: Option<Cents>,
}

/// DTO for updating an order. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub supplier_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub title: Option<String>,
    pub amount_cents: Option<Cents>,
}
