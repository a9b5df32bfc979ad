//! Repository for the `suppliers` table.

use bizdesk_core::lifecycle::record::Supplier;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::supplier::{CreateSupplier, SupplierRow, UpdateSupplier};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = SupplierRow::COLUMNS;

/// Provides create, read and update operations for suppliers.
pub struct SupplierRepo;

impl SupplierRepo {
    /// Insert a new supplier, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSupplier) -> RepoResult<Supplier> {
        input.validate()?;

        let query = format!(
            "INSERT INTO suppliers (name, contact_person, email, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SupplierRow>(&query)
            .bind(&input.name)
            .bind(&input.contact_person)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// Find a supplier by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, SupplierRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List active suppliers by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Supplier>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM suppliers WHERE is_deleted = 0 ORDER BY name, id");
        let rows = sqlx::query_as::<_, SupplierRow>(&query)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }

    /// Update an active supplier. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSupplier,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!(
            "UPDATE suppliers SET
                name = COALESCE($2, name),
                contact_person = COALESCE($3, contact_person),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupplierRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.contact_person)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
