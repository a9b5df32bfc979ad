//! In-process entity store.
//!
//! All tables sit behind one async mutex. A transaction holds the owned
//! guard for its whole lifetime and works on a copy of the tables, which
//! replaces the originals on commit. Transactions are therefore fully
//! serialized, and dropping one discards its changes.
//!
//! Enforced references are checked on delete the way a database foreign key
//! would, so cascades that forget a child fail here too.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::kind::{EntityKind, RecordKind};
use super::policy;
use super::record::Record;
use super::store::{EntityStore, Filter, ParentRef, Patch, StoreError, StoreResult, StoreTx};
use crate::types::DbId;

#[derive(Debug, Clone, Default)]
struct Tables {
    rows: BTreeMap<RecordKind, BTreeMap<DbId, Record>>,
    last_id: BTreeMap<RecordKind, DbId>,
    failing_deletes: BTreeSet<RecordKind>,
}

impl Tables {
    fn table(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.rows.get(&kind).into_iter().flat_map(|t| t.values())
    }

    fn table_mut(&mut self, kind: RecordKind) -> &mut BTreeMap<DbId, Record> {
        self.rows.entry(kind).or_default()
    }

    fn check_delete(&self, kind: RecordKind) -> StoreResult<()> {
        if self.failing_deletes.contains(&kind) {
            return Err(StoreError::backend(std::io::Error::other(format!(
                "injected delete failure on {kind}"
            ))));
        }
        Ok(())
    }

    /// Refuse to remove `kind`/`id` while an enforced reference points at it.
    fn check_unreferenced(&self, kind: RecordKind, id: DbId) -> StoreResult<()> {
        for reference in policy::enforced_references_to(kind) {
            let referenced = self
                .table(reference.child)
                .any(|r| r.reference(kind) == Some(id));
            if referenced {
                return Err(StoreError::Constraint(format!(
                    "{kind} {id} is still referenced by {}.{}",
                    reference.child, reference.column
                )));
            }
        }
        Ok(())
    }
}

/// Entity store kept entirely in memory.
///
/// Cloning is cheap and every clone sees the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, bypassing the lifecycle engine.
    ///
    /// A positive id on `record` is kept; zero or negative assigns the next
    /// id for its table. Returns the stored row.
    pub async fn insert(&self, record: impl Into<Record>) -> Record {
        let mut record = record.into();
        let kind = record.kind();
        let mut tables = self.tables.lock().await;

        let last = tables.last_id.entry(kind).or_insert(0);
        let id = if record.id() > 0 {
            record.id()
        } else {
            *last + 1
        };
        *last = (*last).max(id);
        record.set_id(id);

        tables.table_mut(kind).insert(id, record.clone());
        record
    }

    /// Current committed row, if any.
    pub async fn get(&self, kind: RecordKind, id: DbId) -> Option<Record> {
        let tables = self.tables.lock().await;
        tables.rows.get(&kind).and_then(|t| t.get(&id)).cloned()
    }

    /// All committed rows of `kind`, ordered by id.
    pub async fn rows(&self, kind: RecordKind) -> Vec<Record> {
        let tables = self.tables.lock().await;
        tables.table(kind).cloned().collect()
    }

    /// Make every later delete of `kind` fail with [`StoreError::Unavailable`].
    pub async fn fail_deletes_of(&self, kind: RecordKind) {
        self.tables.lock().await.failing_deletes.insert(kind);
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> StoreResult<MemoryTx> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTx { guard, working })
    }
}

/// Transaction over a [`MemoryStore`].
pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find(&mut self, kind: RecordKind, id: DbId) -> StoreResult<Option<Record>> {
        Ok(self
            .working
            .rows
            .get(&kind)
            .and_then(|t| t.get(&id))
            .cloned())
    }

    async fn update(
        &mut self,
        kind: EntityKind,
        id: DbId,
        patch: Patch,
    ) -> StoreResult<Option<Record>> {
        let Some(record) = self.working.table_mut(kind.into()).get_mut(&id) else {
            return Ok(None);
        };
        match patch {
            Patch::Lifecycle(lifecycle) => {
                record.set_lifecycle(lifecycle);
            }
        }
        Ok(Some(record.clone()))
    }

    async fn delete(&mut self, kind: RecordKind, id: DbId) -> StoreResult<bool> {
        self.working.check_delete(kind)?;
        if self.working.rows.get(&kind).is_some_and(|t| t.contains_key(&id)) {
            self.working.check_unreferenced(kind, id)?;
        }
        Ok(self.working.table_mut(kind).remove(&id).is_some())
    }

    async fn delete_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<u64> {
        filter.check(kind)?;
        self.working.check_delete(kind)?;

        let doomed: Vec<DbId> = self
            .working
            .table(kind)
            .filter(|r| filter.matches(r))
            .map(Record::id)
            .collect();
        for id in &doomed {
            self.working.check_unreferenced(kind, *id)?;
        }

        let table = self.working.table_mut(kind);
        for id in &doomed {
            table.remove(id);
        }
        Ok(doomed.len() as u64)
    }

    async fn detach(&mut self, kind: RecordKind, parent: ParentRef) -> StoreResult<u64> {
        let nullable = policy::reference_between(kind, parent.kind).is_some_and(|r| r.nullable);
        if !nullable {
            return Err(StoreError::InvalidFilter(format!(
                "{kind} has no nullable reference to {}",
                parent.kind
            )));
        }

        let mut cleared = 0;
        for record in self.working.table_mut(kind).values_mut() {
            if record.reference(parent.kind) == Some(parent.id) && record.clear_reference(parent.kind)
            {
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    async fn count(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<i64> {
        filter.check(kind)?;
        Ok(self.working.table(kind).filter(|r| filter.matches(r)).count() as i64)
    }

    async fn find_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<Vec<Record>> {
        filter.check(kind)?;
        Ok(self
            .working
            .table(kind)
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn commit(self) -> StoreResult<()> {
        let MemoryTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::lifecycle::record::{Client, Project, Tool};
    use crate::lifecycle::state::Lifecycle;

    fn client(id: DbId) -> Client {
        Client {
            id,
            name: "Acme".into(),
            email: None,
            phone: None,
            address: None,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        }
    }

    fn project(client_id: DbId) -> Project {
        Project {
            id: 0,
            client_id,
            name: "Roof".into(),
            description: None,
            budget_cents: None,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_keeps_explicit_ids_and_continues_after_them() {
        let store = MemoryStore::new();
        assert_eq!(store.insert(client(7)).await.id(), 7);
        assert_eq!(store.insert(client(0)).await.id(), 8);
    }

    #[tokio::test]
    async fn uncommitted_transaction_is_discarded() {
        let store = MemoryStore::new();
        store.insert(client(1)).await;

        let mut tx = store.begin().await.unwrap();
        assert!(tx.delete(RecordKind::Client, 1).await.unwrap());
        drop(tx);

        assert!(store.get(RecordKind::Client, 1).await.is_some());
    }

    #[tokio::test]
    async fn committed_transaction_is_visible() {
        let store = MemoryStore::new();
        store.insert(client(1)).await;

        let mut tx = store.begin().await.unwrap();
        tx.update(
            EntityKind::Client,
            1,
            Patch::Lifecycle(Lifecycle::deleted(Utc::now())),
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let stored = store.get(RecordKind::Client, 1).await.unwrap();
        assert!(stored.lifecycle().unwrap().is_deleted());
    }

    #[tokio::test]
    async fn delete_of_referenced_parent_violates_constraint() {
        let store = MemoryStore::new();
        store.insert(client(1)).await;
        store.insert(project(1)).await;

        let mut tx = store.begin().await.unwrap();
        let err = tx.delete(RecordKind::Client, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn detach_requires_nullable_reference() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx
            .detach(RecordKind::Project, ParentRef::new(RecordKind::Client, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter(_)));
    }

    #[tokio::test]
    async fn injected_delete_failure_surfaces_as_unavailable() {
        let store = MemoryStore::new();
        store
            .insert(Tool {
                id: 0,
                name: "Ladder".into(),
                serial_number: None,
                qr_code: None,
                created_at: Utc::now(),
            })
            .await;
        store.fail_deletes_of(RecordKind::Tool).await;

        let mut tx = store.begin().await.unwrap();
        let err = tx.delete(RecordKind::Tool, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
