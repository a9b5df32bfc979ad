//! Read-side views of the trash.

use serde::Serialize;

use super::kind::EntityKind;
use super::record::{Client, Order, Project, Record, SoftDeletable, Supplier};
use crate::types::{DbId, Timestamp};

/// Deleted records of the four kinds shown on the trash page.
///
/// Each list is ordered by `deleted_at` descending, ties broken by id
/// descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrashSnapshot {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
    pub orders: Vec<Order>,
}

impl TrashSnapshot {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.clients.is_empty()
            && self.suppliers.is_empty()
            && self.orders.is_empty()
    }
}

/// A single soft-deleted item in the unified trash list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrashedItem {
    pub id: DbId,
    pub entity_type: EntityKind,
    pub name_or_label: Option<String>,
    pub deleted_at: Timestamp,
}

impl TrashedItem {
    /// Project a deleted record. Returns `None` for live records and for
    /// kinds without a trash concept.
    pub fn from_record(record: &Record) -> Option<Self> {
        let entity_type = record.kind().entity_kind()?;
        let deleted_at = record.lifecycle()?.deleted_at()?;
        Some(Self {
            id: record.id(),
            entity_type,
            name_or_label: record.label().map(str::to_string),
            deleted_at,
        })
    }
}

/// Summary returned by the unified trash listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrashSummary {
    pub items: Vec<TrashedItem>,
    pub total_count: i64,
}

/// Preview of what emptying the trash would remove.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgePreview {
    pub counts_by_type: Vec<PurgeCount>,
    pub total_count: i64,
}

/// Per-kind count of soft-deleted rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeCount {
    pub entity_type: EntityKind,
    pub count: i64,
}

/// Unwrap records of type `T` and order them newest-deleted first.
pub(crate) fn collect_deleted<T: SoftDeletable>(records: Vec<Record>) -> Vec<T> {
    let mut typed: Vec<T> = records
        .into_iter()
        .filter_map(T::from_record)
        .filter(|r| r.lifecycle().is_deleted())
        .collect();
    typed.sort_by(|a, b| {
        b.lifecycle()
            .deleted_at()
            .cmp(&a.lifecycle().deleted_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    typed
}

/// Order trash items newest-deleted first.
pub(crate) fn sort_items(items: &mut [TrashedItem]) {
    items.sort_by(|a, b| {
        b.deleted_at
            .cmp(&a.deleted_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::lifecycle::state::Lifecycle;

    fn supplier(id: DbId, lifecycle: Lifecycle) -> Record {
        Record::Supplier(Supplier {
            id,
            name: format!("Supplier {id}"),
            contact_person: None,
            email: None,
            phone: None,
            lifecycle,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn collect_deleted_orders_newest_first_and_skips_live_rows() {
        let now = Utc::now();
        let records = vec![
            supplier(1, Lifecycle::deleted(now - Duration::minutes(5))),
            supplier(2, Lifecycle::Active),
            supplier(3, Lifecycle::deleted(now)),
            supplier(4, Lifecycle::deleted(now)),
        ];

        let ids: Vec<DbId> = collect_deleted::<Supplier>(records)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }

    #[test]
    fn trashed_item_requires_deleted_state() {
        assert!(TrashedItem::from_record(&supplier(1, Lifecycle::Active)).is_none());

        let item = TrashedItem::from_record(&supplier(1, Lifecycle::deleted(Utc::now()))).unwrap();
        assert_eq!(item.entity_type, EntityKind::Supplier);
        assert_eq!(item.name_or_label.as_deref(), Some("Supplier 1"));
    }
}
