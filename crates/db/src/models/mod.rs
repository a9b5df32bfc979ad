//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` row struct matching the table, converted into the core
//!   record type at the boundary
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where the table is
//!   editable
//!
//! Update DTOs never carry `is_deleted` / `deleted_at`; those move only
//! through the lifecycle engine.

pub mod client;
pub mod employee;
pub mod estimate;
pub mod expense;
pub mod order;
pub mod project;
pub mod resource;
pub mod supplier;
pub mod task;
pub mod tool;
pub mod warehouse_item;

use bizdesk_core::lifecycle::{InvalidLifecycle, Lifecycle, Record, RecordKind};
use bizdesk_core::types::Timestamp;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// The two lifecycle columns shared by every soft-deletable table.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct LifecycleRow {
    pub is_deleted: i16,
    pub deleted_at: Option<Timestamp>,
}

impl LifecycleRow {
    pub fn into_lifecycle(self) -> Result<Lifecycle, InvalidLifecycle> {
        Lifecycle::from_columns(self.is_deleted, self.deleted_at)
    }
}

/// A row type that maps onto one core record kind.
pub trait StoredRow: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    type Model: Into<Record>;

    const KIND: RecordKind;

    /// Column list selected for this row, in `FromRow` order.
    const COLUMNS: &'static str;

    fn into_model(self) -> Result<Self::Model, InvalidLifecycle>;
}

/// Convert a fetched row, reporting a bad lifecycle pair as a decode error.
pub(crate) fn decode<R: StoredRow>(row: R) -> Result<R::Model, sqlx::Error> {
    row.into_model()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

pub(crate) fn decode_all<R: StoredRow>(rows: Vec<R>) -> Result<Vec<R::Model>, sqlx::Error> {
    rows.into_iter().map(decode).collect()
}
