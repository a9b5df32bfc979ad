//! Repositories for `cost_estimate_items` and `quotation_items`.
//!
//! The two tables share one shape; each repository is a thin wrapper over
//! the generic helpers at the bottom of this file.

use bizdesk_core::lifecycle::record::{CostEstimateItem, QuotationItem};
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::estimate::{CostEstimateItemRow, CreateLineItem, QuotationItemRow};
use crate::models::{decode, decode_all, StoredRow};

/// Lines of a project's cost estimate.
pub struct CostEstimateRepo;

impl CostEstimateRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLineItem,
    ) -> RepoResult<CostEstimateItem> {
        create_line::<CostEstimateItemRow>(pool, input).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CostEstimateItem>, sqlx::Error> {
        find_line::<CostEstimateItemRow>(pool, id).await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CostEstimateItem>, sqlx::Error> {
        list_lines::<CostEstimateItemRow>(pool, project_id).await
    }
}

/// Lines of a project's quotation.
pub struct QuotationRepo;

impl QuotationRepo {
    pub async fn create(pool: &PgPool, input: &CreateLineItem) -> RepoResult<QuotationItem> {
        create_line::<QuotationItemRow>(pool, input).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuotationItem>, sqlx::Error> {
        find_line::<QuotationItemRow>(pool, id).await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<QuotationItem>, sqlx::Error> {
        list_lines::<QuotationItemRow>(pool, project_id).await
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn create_line<R: StoredRow>(
    pool: &PgPool,
    input: &CreateLineItem,
) -> RepoResult<R::Model> {
    input.validate()?;

    let query = format!(
        "INSERT INTO {} (project_id, description, quantity, unit_price_cents)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        R::KIND,
        R::COLUMNS
    );
    let row = sqlx::query_as::<_, R>(&query)
        .bind(input.project_id)
        .bind(&input.description)
        .bind(input.quantity)
        .bind(input.unit_price_cents)
        .fetch_one(pool)
        .await?;
    Ok(decode(row)?)
}

async fn find_line<R: StoredRow>(pool: &PgPool, id: DbId) -> Result<Option<R::Model>, sqlx::Error> {
    let query = format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::KIND);
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(decode)
        .transpose()
}

async fn list_lines<R: StoredRow>(
    pool: &PgPool,
    project_id: DbId,
) -> Result<Vec<R::Model>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM {} WHERE project_id = $1 ORDER BY id",
        R::COLUMNS,
        R::KIND
    );
    let rows = sqlx::query_as::<_, R>(&query)
        .bind(project_id)
        .fetch_all(pool)
        .await?;
    decode_all(rows)
}
