//! The lifecycle engine: soft delete, restore, purge and the trash views.
//!
//! Each public operation opens one store transaction and commits it only
//! after the guard check, the state change and any cascade have all
//! succeeded. Returning early drops the transaction, which rolls it back.

use chrono::Utc;

use super::error::{LifecycleError, LifecycleResult};
use super::kind::{EntityKind, RecordKind};
use super::policy;
use super::record::{HardDeleteOnly, Record};
use super::state::Lifecycle;
use super::store::{EntityStore, Filter, ParentRef, Patch, StoreError, StoreTx};
use super::trash::{
    collect_deleted, sort_items, PurgeCount, PurgePreview, TrashSnapshot, TrashSummary,
    TrashedItem,
};
use crate::types::DbId;

/// Outcome of a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The record moved from active to deleted.
    Applied,
    /// The record was already deleted; nothing was written.
    Unchanged,
}

/// Runs lifecycle operations against an injected entity store.
pub struct LifecycleEngine<S> {
    store: S,
}

impl<S: EntityStore> LifecycleEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Soft delete ───────────────────────────────────────────────────

    /// Move a record to the trash.
    ///
    /// Guarded kinds fail with [`LifecycleError::HasActiveDependents`] while
    /// live dependents exist. Deleting an already deleted record succeeds
    /// without rewriting its `deleted_at`.
    pub async fn soft_delete(&self, kind: EntityKind, id: DbId) -> LifecycleResult<Transition> {
        let mut tx = self.store.begin().await?;
        let record = load(&mut tx, kind.into(), id).await?;

        if is_deleted(&record) {
            return Ok(Transition::Unchanged);
        }

        if let Some(rule) = policy::guard_for(kind) {
            let filter = Filter::children_of(ParentRef::new(kind, id)).active();
            let count = tx.count(rule.dependent, &filter).await?;
            if count > 0 {
                return Err(LifecycleError::HasActiveDependents {
                    kind: kind.into(),
                    id,
                    dependent: rule.dependent,
                    count,
                });
            }
        }

        let patch = Patch::Lifecycle(Lifecycle::deleted(Utc::now()));
        tx.update(kind, id, patch)
            .await?
            .ok_or(LifecycleError::NotFound {
                kind: kind.into(),
                id,
            })?;
        tx.commit().await?;
        Ok(Transition::Applied)
    }

    /// Number of live dependents that block deleting `kind`/`id`.
    ///
    /// Zero for kinds without a guard rule, including suppliers.
    pub async fn has_active_dependents(&self, kind: EntityKind, id: DbId) -> LifecycleResult<i64> {
        let Some(rule) = policy::guard_for(kind) else {
            return Ok(0);
        };
        let mut tx = self.store.begin().await?;
        let filter = Filter::children_of(ParentRef::new(kind, id)).active();
        Ok(tx.count(rule.dependent, &filter).await?)
    }

    // ── Restore ───────────────────────────────────────────────────────

    /// Bring a deleted record back. Children deleted on their own stay
    /// deleted.
    pub async fn restore(&self, kind: EntityKind, id: DbId) -> LifecycleResult<Record> {
        let mut tx = self.store.begin().await?;
        let record = load(&mut tx, kind.into(), id).await?;

        if !is_deleted(&record) {
            return Err(LifecycleError::NotDeleted {
                kind: kind.into(),
                id,
            });
        }

        if let Some(parent) = policy::restore_parent(kind) {
            if let Some(parent_id) = record.reference(parent) {
                let parent_record = tx.find(parent, parent_id).await?;
                if parent_record.as_ref().is_some_and(is_deleted) {
                    return Err(LifecycleError::ParentDeleted {
                        kind: kind.into(),
                        id,
                        parent,
                        parent_id,
                    });
                }
            }
        }

        let restored = tx
            .update(kind, id, Patch::Lifecycle(Lifecycle::Active))
            .await?
            .ok_or(LifecycleError::NotFound {
                kind: kind.into(),
                id,
            })?;
        tx.commit().await?;
        Ok(restored)
    }

    // ── Purge ─────────────────────────────────────────────────────────

    /// Permanently remove a record, active or deleted, together with the
    /// children it strictly owns.
    pub async fn purge(&self, kind: EntityKind, id: DbId) -> LifecycleResult<()> {
        let mut tx = self.store.begin().await?;
        purge_in(&mut tx, kind.into(), id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Remove a hard-delete-only record and clear the relations it owns.
    pub async fn hard_delete<T: HardDeleteOnly>(&self, id: DbId) -> LifecycleResult<()> {
        let mut tx = self.store.begin().await?;
        purge_in(&mut tx, T::KIND, id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Purge every deleted record, leaves before roots, in one transaction.
    ///
    /// Returns the number of trashed records removed (owned children that
    /// went along with them are not counted). Any failure leaves the trash
    /// as it was.
    pub async fn empty_trash(&self) -> LifecycleResult<u64> {
        let mut tx = self.store.begin().await?;
        let mut purged: u64 = 0;

        for kind in policy::PURGE_ORDER {
            let trashed = tx.find_many(kind.into(), &Filter::deleted()).await?;
            for record in trashed {
                purge_in(&mut tx, kind.into(), record.id()).await?;
                purged += 1;
            }
        }

        tx.commit().await?;
        Ok(purged)
    }

    // ── Trash views ───────────────────────────────────────────────────

    /// Deleted projects, clients, suppliers and orders.
    pub async fn list_deleted(&self) -> LifecycleResult<TrashSnapshot> {
        let mut tx = self.store.begin().await?;
        let deleted = Filter::deleted();

        let projects = tx.find_many(RecordKind::Project, &deleted).await?;
        let clients = tx.find_many(RecordKind::Client, &deleted).await?;
        let suppliers = tx.find_many(RecordKind::Supplier, &deleted).await?;
        let orders = tx.find_many(RecordKind::Order, &deleted).await?;

        Ok(TrashSnapshot {
            projects: collect_deleted(projects),
            clients: collect_deleted(clients),
            suppliers: collect_deleted(suppliers),
            orders: collect_deleted(orders),
        })
    }

    /// Deleted records across every soft-deletable kind, or only `kind`.
    pub async fn list_trashed(&self, kind: Option<EntityKind>) -> LifecycleResult<TrashSummary> {
        let kinds: Vec<EntityKind> = match kind {
            Some(kind) => vec![kind],
            None => EntityKind::ALL.to_vec(),
        };

        let mut tx = self.store.begin().await?;
        let mut items = Vec::new();
        for kind in kinds {
            let records = tx.find_many(kind.into(), &Filter::deleted()).await?;
            items.extend(records.iter().filter_map(TrashedItem::from_record));
        }
        sort_items(&mut items);

        let total_count = items.len() as i64;
        Ok(TrashSummary { items, total_count })
    }

    /// Count what [`empty_trash`](Self::empty_trash) would remove.
    pub async fn purge_preview(&self) -> LifecycleResult<PurgePreview> {
        let mut tx = self.store.begin().await?;
        let mut counts_by_type = Vec::new();
        let mut total_count: i64 = 0;

        for kind in EntityKind::ALL {
            let count = tx.count(kind.into(), &Filter::deleted()).await?;
            if count > 0 {
                counts_by_type.push(PurgeCount {
                    entity_type: kind,
                    count,
                });
                total_count += count;
            }
        }

        Ok(PurgePreview {
            counts_by_type,
            total_count,
        })
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

async fn load<T: StoreTx>(tx: &mut T, kind: RecordKind, id: DbId) -> LifecycleResult<Record> {
    tx.find(kind, id)
        .await?
        .ok_or(LifecycleError::NotFound { kind, id })
}

fn is_deleted(record: &Record) -> bool {
    record.lifecycle().is_some_and(|l| l.is_deleted())
}

/// Purge one row inside an open transaction.
///
/// Guard first, then owned children (clearing what points at them), then
/// nullable references to this row, then the row itself.
async fn purge_in<T: StoreTx>(tx: &mut T, kind: RecordKind, id: DbId) -> LifecycleResult<()> {
    load(tx, kind, id).await?;
    let this = ParentRef::new(kind, id);

    if let Some(rule) = kind.entity_kind().and_then(policy::guard_for) {
        let dependents = Filter::children_of(this);
        let active = tx.count(rule.dependent, &dependents.active()).await?;
        if active > 0 {
            return Err(LifecycleError::HasActiveDependents {
                kind,
                id,
                dependent: rule.dependent,
                count: active,
            });
        }
        let deleted = tx.count(rule.dependent, &dependents.only_deleted()).await?;
        if deleted > 0 {
            return Err(LifecycleError::HasDeletedDependents {
                kind,
                id,
                dependent: rule.dependent,
                count: deleted,
            });
        }
    }

    for child in policy::owned_children(kind) {
        let cleanup_failed = |source: StoreError| LifecycleError::DependentCleanupFailed {
            kind,
            id,
            child: *child,
            source,
        };
        let detached = policy::detached_on_purge(*child);
        if !detached.is_empty() {
            let owned = tx
                .find_many(*child, &Filter::children_of(this))
                .await
                .map_err(cleanup_failed)?;
            for row in &owned {
                for dependent in detached {
                    tx.detach(*dependent, ParentRef::new(*child, row.id()))
                        .await
                        .map_err(cleanup_failed)?;
                }
            }
        }
        tx.delete_many(*child, &Filter::children_of(this))
            .await
            .map_err(cleanup_failed)?;
    }

    for dependent in policy::detached_on_purge(kind) {
        tx.detach(*dependent, this)
            .await
            .map_err(|source| LifecycleError::DependentCleanupFailed {
                kind,
                id,
                child: *dependent,
                source,
            })?;
    }

    if !tx.delete(kind, id).await? {
        return Err(LifecycleError::NotFound { kind, id });
    }
    Ok(())
}
