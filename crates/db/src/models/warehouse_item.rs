//! Warehouse item row and DTOs.

use bizdesk_core::lifecycle::record::WarehouseItem;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `warehouse_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct WarehouseItemRow {
    pub id: DbId,
    pub name: String,
    pub quantity: i32,
    pub location: Option<String>,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for WarehouseItemRow {
    type Model = WarehouseItem;

    const KIND: RecordKind = RecordKind::WarehouseItem;
    const COLUMNS: &'static str =
        "id, name, quantity, location, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<WarehouseItem, InvalidLifecycle> {
        Ok(WarehouseItem {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            location: self.location,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for stocking a new warehouse item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWarehouseItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub location: Option<String>,
}

/// DTO for updating a warehouse item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWarehouseItem {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub location: Option<String>,
}
