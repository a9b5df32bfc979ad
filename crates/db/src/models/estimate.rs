//! Cost estimate and quotation line items. Both tables share one shape and
//! have no trash: deleting a line is final.

use bizdesk_core::lifecycle::record::{CostEstimateItem, QuotationItem};
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{Cents, DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::StoredRow;

const LINE_COLUMNS: &str = "id, project_id, description, quantity, unit_price_cents, created_at";

/// A row from `cost_estimate_items` or `quotation_items`.
#[derive(Debug, Clone, FromRow)]
pub struct LineItemRow {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub quantity: i32,
    pub unit_price_cents: Cents,
    pub created_at: Timestamp,
}

/// `cost_estimate_items` row.
#[derive(Debug, Clone, FromRow)]
pub struct CostEstimateItemRow {
    #[sqlx(flatten)]
    pub line: LineItemRow,
}

/// `quotation_items` row.
#[derive(Debug, Clone, FromRow)]
pub struct QuotationItemRow {
    #[sqlx(flatten)]
    pub line: LineItemRow,
}

impl StoredRow for CostEstimateItemRow {
    type Model = CostEstimateItem;

    const KIND: RecordKind = RecordKind::CostEstimateItem;
    const COLUMNS: &'static str = LINE_COLUMNS;

    fn into_model(self) -> Result<CostEstimateItem, InvalidLifecycle> {
        let l = self.line;
        Ok(CostEstimateItem {
            id: l.id,
            project_id: l.project_id,
            description: l.description,
            quantity: l.quantity,
            unit_price_cents: l.unit_price_cents,
            created_at: l.created_at,
        })
    }
}

impl StoredRow for QuotationItemRow {
    type Model = QuotationItem;

    const KIND: RecordKind = RecordKind::QuotationItem;
    const COLUMNS: &'static str = LINE_COLUMNS;

    fn into_model(self) -> Result<QuotationItem, InvalidLifecycle> {
        let l = self.line;
        Ok(QuotationItem {
            id: l.id,
            project_id: l.project_id,
            description: l.description,
            quantity: l.quantity,
            unit_price_cents: l.unit_price_cents,
            created_at: l.created_at,
        })
    }
}

/// DTO for adding a line to a project's estimate or quotation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLineItem {
    pub project_id: DbId,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub unit_price_cents: Cents,
}

