//! Repository for the `warehouse_items` table.

use bizdesk_core::lifecycle::record::WarehouseItem;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::warehouse_item::{CreateWarehouseItem, UpdateWarehouseItem, WarehouseItemRow};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = WarehouseItemRow::COLUMNS;

/// Provides create, read and update operations for warehouse stock.
pub struct WarehouseItemRepo;

impl WarehouseItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateWarehouseItem,
    ) -> RepoResult<WarehouseItem> {
        input.validate()?;

        let query = format!(
            "INSERT INTO warehouse_items (name, quantity, location)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WarehouseItemRow>(&query)
            .bind(&input.name)
            .bind(input.quantity)
            .bind(&input.location)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WarehouseItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM warehouse_items WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, WarehouseItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<WarehouseItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM warehouse_items WHERE is_deleted = 0 ORDER BY name, id");
        let rows = sqlx::query_as::<_, WarehouseItemRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an active item. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWarehouseItem,
    ) -> Result<Option<WarehouseItem>, sqlx::Error> {
        let query = format!(
            "UPDATE warehouse_items SET
                name = COALESCE($2, name),
                quantity = COALESCE($3, quantity),
                location = COALESCE($4, location)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WarehouseItemRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.quantity)
            .bind(&input.location)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
