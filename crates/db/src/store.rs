//! PostgreSQL implementation of the lifecycle store contract.
//!
//! Each [`PgTx`] wraps one database transaction. Rows read through
//! [`StoreTx::find`] are locked `FOR UPDATE`, so two engine operations on the
//! same record serialize on the row lock rather than interleaving.

use async_trait::async_trait;
use bizdesk_core::lifecycle::policy;
use bizdesk_core::lifecycle::{
    EntityKind, EntityStore, Filter, ParentRef, Patch, Record, RecordKind, StateFilter,
    StoreError, StoreResult, StoreTx,
};
use bizdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::models::client::ClientRow;
use crate::models::employee::{EmployeePermissionRow, EmployeeRow};
use crate::models::estimate::{CostEstimateItemRow, QuotationItemRow};
use crate::models::expense::ExpenseRow;
use crate::models::order::OrderRow;
use crate::models::project::ProjectRow;
use crate::models::resource::ResourceRow;
use crate::models::supplier::SupplierRow;
use crate::models::task::TaskRow;
use crate::models::tool::{ProtocolRow, ToolAssignmentRow, ToolRow};
use crate::models::warehouse_item::WarehouseItemRow;
use crate::models::StoredRow;

/// PostgreSQL error code for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL error code for a CHECK constraint violation.
const CHECK_VIOLATION: &str = "23514";

/// Entity store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgEntityStore {
    type Tx = PgTx;

    async fn begin(&self) -> StoreResult<PgTx> {
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(PgTx { tx })
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}

/// One open database transaction.
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

/// Expand to a `match` over every record kind, calling the generic `$func`
/// with the row type stored for that kind.
macro_rules! with_row_type {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            RecordKind::Client => $func::<ClientRow>($($arg),*).await,
            RecordKind::Supplier => $func::<SupplierRow>($($arg),*).await,
            RecordKind::Project => $func::<ProjectRow>($($arg),*).await,
            RecordKind::Order => $func::<OrderRow>($($arg),*).await,
            RecordKind::Task => $func::<TaskRow>($($arg),*).await,
            RecordKind::Expense => $func::<ExpenseRow>($($arg),*).await,
            RecordKind::Resource => $func::<ResourceRow>($($arg),*).await,
            RecordKind::WarehouseItem => $func::<WarehouseItemRow>($($arg),*).await,
            RecordKind::CostEstimateItem => $func::<CostEstimateItemRow>($($arg),*).await,
            RecordKind::QuotationItem => $func::<QuotationItemRow>($($arg),*).await,
            RecordKind::Employee => $func::<EmployeeRow>($($arg),*).await,
            RecordKind::EmployeePermission => $func::<EmployeePermissionRow>($($arg),*).await,
            RecordKind::Tool => $func::<ToolRow>($($arg),*).await,
            RecordKind::ToolAssignment => $func::<ToolAssignmentRow>($($arg),*).await,
            RecordKind::Protocol => $func::<ProtocolRow>($($arg),*).await,
        }
    };
}

#[async_trait]
impl StoreTx for PgTx {
    async fn find(&mut self, kind: RecordKind, id: DbId) -> StoreResult<Option<Record>> {
        with_row_type!(kind, find_row(&mut *self.tx, id))
    }

    async fn update(
        &mut self,
        kind: EntityKind,
        id: DbId,
        patch: Patch,
    ) -> StoreResult<Option<Record>> {
        with_row_type!(kind.record_kind(), update_row(&mut *self.tx, id, patch))
    }

    async fn delete(&mut self, kind: RecordKind, id: DbId) -> StoreResult<bool> {
        let query = format!("DELETE FROM {kind} WHERE id = $1");
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<u64> {
        let clause = where_clause(kind, filter)?;
        let query = format!("DELETE FROM {kind}{}", clause.sql);
        let mut statement = sqlx::query(&query);
        if let Some(parent_id) = clause.parent_id {
            statement = statement.bind(parent_id);
        }
        let result = statement
            .execute(&mut *self.tx)
            .await
            .map_err(store_error)?;

        tracing::debug!(
            table = %kind,
            deleted = result.rows_affected(),
            "Deleted rows",
        );
        Ok(result.rows_affected())
    }

    async fn detach(&mut self, kind: RecordKind, parent: ParentRef) -> StoreResult<u64> {
        let column = match policy::reference_between(kind, parent.kind) {
            Some(reference) if reference.nullable => reference.column,
            _ => {
                return Err(StoreError::InvalidFilter(format!(
                    "{kind} has no nullable reference to {}",
                    parent.kind
                )))
            }
        };

        let query = format!("UPDATE {kind} SET {column} = NULL WHERE {column} = $1");
        let result = sqlx::query(&query)
            .bind(parent.id)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error)?;

        tracing::debug!(
            table = %kind,
            column,
            parent_id = parent.id,
            cleared = result.rows_affected(),
            "Detached references",
        );
        Ok(result.rows_affected())
    }

    async fn count(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<i64> {
        let clause = where_clause(kind, filter)?;
        let query = format!("SELECT COUNT(*) FROM {kind}{}", clause.sql);
        let mut statement = sqlx::query_as::<_, (i64,)>(&query);
        if let Some(parent_id) = clause.parent_id {
            statement = statement.bind(parent_id);
        }
        let (count,) = statement
            .fetch_one(&mut *self.tx)
            .await
            .map_err(store_error)?;
        Ok(count)
    }

    async fn find_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<Vec<Record>> {
        let clause = where_clause(kind, filter)?;
        with_row_type!(kind, find_rows(&mut *self.tx, &clause))
    }

    async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await.map_err(store_error)
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

async fn find_row<R: StoredRow>(conn: &mut PgConnection, id: DbId) -> StoreResult<Option<Record>> {
    let query = format!(
        "SELECT {} FROM {} WHERE id = $1 FOR UPDATE",
        R::COLUMNS,
        R::KIND
    );
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(store_error)?
        .map(into_record)
        .transpose()
}

async fn update_row<R: StoredRow>(
    conn: &mut PgConnection,
    id: DbId,
    patch: Patch,
) -> StoreResult<Option<Record>> {
    let Patch::Lifecycle(lifecycle) = patch;
    let query = format!(
        "UPDATE {} SET is_deleted = $2, deleted_at = $3 WHERE id = $1 RETURNING {}",
        R::KIND,
        R::COLUMNS
    );
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .bind(lifecycle.flag().as_i16())
        .bind(lifecycle.deleted_at())
        .fetch_optional(conn)
        .await
        .map_err(store_error)?
        .map(into_record)
        .transpose()
}

async fn find_rows<R: StoredRow>(
    conn: &mut PgConnection,
    clause: &WhereClause,
) -> StoreResult<Vec<Record>> {
    let query = format!(
        "SELECT {} FROM {}{} ORDER BY id",
        R::COLUMNS,
        R::KIND,
        clause.sql
    );
    let mut statement = sqlx::query_as::<_, R>(&query);
    if let Some(parent_id) = clause.parent_id {
        statement = statement.bind(parent_id);
    }
    statement
        .fetch_all(conn)
        .await
        .map_err(store_error)?
        .into_iter()
        .map(into_record)
        .collect()
}

fn into_record<R: StoredRow>(row: R) -> StoreResult<Record> {
    row.into_model()
        .map(Into::into)
        .map_err(|e| StoreError::Corrupt(format!("{}: {e}", R::KIND)))
}

/// SQL `WHERE` fragment for a [`Filter`]. A parent id, when present, is
/// bound as `$1`.
struct WhereClause {
    sql: String,
    parent_id: Option<DbId>,
}

fn where_clause(kind: RecordKind, filter: &Filter) -> StoreResult<WhereClause> {
    filter.check(kind)?;

    let mut conditions: Vec<String> = Vec::new();
    let mut parent_id = None;

    if let Some(parent) = filter.parent {
        if let Some(reference) = policy::reference_between(kind, parent.kind) {
            conditions.push(format!("{} = $1", reference.column));
            parent_id = Some(parent.id);
        }
    }
    match filter.state {
        StateFilter::Any => {}
        StateFilter::Active => conditions.push("is_deleted = 0".to_string()),
        StateFilter::Deleted => conditions.push("is_deleted = 1".to_string()),
    }

    let sql = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    Ok(WhereClause { sql, parent_id })
}

/// Map a driver error onto the store's error kinds.
fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db)
            if matches!(db.code().as_deref(), Some(FOREIGN_KEY_VIOLATION | CHECK_VIOLATION)) =>
        {
            StoreError::Constraint(db.message().to_string())
        }
        sqlx::Error::Decode(source) => StoreError::Corrupt(source.to_string()),
        sqlx::Error::ColumnDecode { index, source } => {
            StoreError::Corrupt(format!("column {index}: {source}"))
        }
        _ => StoreError::backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_clause_combines_parent_and_state() {
        let filter = Filter::children_of(ParentRef::new(RecordKind::Client, 7)).only_deleted();
        let clause = where_clause(RecordKind::Project, &filter).unwrap();
        assert_eq!(clause.sql, " WHERE client_id = $1 AND is_deleted = 1");
        assert_eq!(clause.parent_id, Some(7));
    }

    #[test]
    fn where_clause_is_empty_for_unfiltered_queries() {
        let clause = where_clause(RecordKind::Tool, &Filter::all()).unwrap();
        assert_eq!(clause.sql, "");
        assert_eq!(clause.parent_id, None);
    }

    #[test]
    fn where_clause_rejects_state_on_hard_delete_kinds() {
        let err = where_clause(RecordKind::QuotationItem, &Filter::deleted());
        assert!(matches!(err, Err(StoreError::InvalidFilter(_))));
    }
}
