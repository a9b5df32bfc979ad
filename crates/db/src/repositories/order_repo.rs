//! Repository for the `orders` table.

use bizdesk_core::lifecycle::record::Order;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::order::{CreateOrder, OrderRow, UpdateOrder};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = OrderRow::COLUMNS;

/// Provides create, read and update operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> RepoResult<Order> {
        input.validate()?;

        let query = format!(
            "INSERT INTO orders (project_id, supplier_id, task_id, title, amount_cents)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(input.project_id)
            .bind(input.supplier_id)
            .bind(input.task_id)
            .bind(&input.title)
            .bind(input.amount_cents)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// Find an order by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Find an order by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List a project's active orders.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE project_id = $1 AND is_deleted = 0
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// List a supplier's active orders.
    pub async fn list_by_supplier(
        pool: &PgPool,
        supplier_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE supplier_id = $1 AND is_deleted = 0
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(supplier_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an active order. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                supplier_id = COALESCE($2, supplier_id),
                task_id = COALESCE($3, task_id),
                title = COALESCE($4, title),
                amount_cents = COALESCE($5, amount_cents)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .bind(input.supplier_id)
            .bind(input.task_id)
            .bind(&input.title)
            .bind(input.amount_cents)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
