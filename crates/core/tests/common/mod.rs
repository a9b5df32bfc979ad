#![allow(dead_code)]

use bizdesk_core::lifecycle::record::{
    Client, CostEstimateItem, Employee, EmployeePermission, Expense, Order, Project, Protocol,
    Supplier, Task, Tool, ToolAssignment, WarehouseItem,
};
use bizdesk_core::lifecycle::{Lifecycle, LifecycleEngine, MemoryStore, Record, RecordKind};
use bizdesk_core::types::DbId;
use chrono::{Duration, Utc};

pub fn engine() -> LifecycleEngine<MemoryStore> {
    LifecycleEngine::new(MemoryStore::new())
}

pub fn deleted_minutes_ago(minutes: i64) -> Lifecycle {
    Lifecycle::deleted(Utc::now() - Duration::minutes(minutes))
}

pub async fn client(store: &MemoryStore, id: DbId, name: &str) -> DbId {
    client_with(store, id, name, Lifecycle::Active).await
}

pub async fn client_with(store: &MemoryStore, id: DbId, name: &str, lifecycle: Lifecycle) -> DbId {
    store
        .insert(Client {
            id,
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
            lifecycle,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn supplier(store: &MemoryStore, name: &str) -> DbId {
    store
        .insert(Supplier {
            id: 0,
            name: name.to_string(),
            contact_person: None,
            email: None,
            phone: None,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn project(store: &MemoryStore, id: DbId, client_id: DbId, lifecycle: Lifecycle) -> DbId {
    store
        .insert(Project {
            id,
            client_id,
            name: format!("Project for client {client_id}"),
            description: None,
            budget_cents: Some(1_000_000),
            lifecycle,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn order(
    store: &MemoryStore,
    project_id: DbId,
    supplier_id: Option<DbId>,
    task_id: Option<DbId>,
) -> DbId {
    store
        .insert(Order {
            id: 0,
            project_id,
            supplier_id,
            task_id,
            title: "Timber delivery".to_string(),
            amount_cents: Some(45_000),
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn task(store: &MemoryStore, project_id: DbId) -> DbId {
    store
        .insert(Task {
            id: 0,
            project_id,
            title: "Measure walls".to_string(),
            done: false,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn expense(store: &MemoryStore, project_id: DbId) -> DbId {
    store
        .insert(Expense {
            id: 0,
            project_id,
            description: "Fuel".to_string(),
            amount_cents: 8_000,
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn estimate_item(store: &MemoryStore, project_id: DbId) -> DbId {
    store
        .insert(CostEstimateItem {
            id: 0,
            project_id,
            description: "Roof tiles".to_string(),
            quantity: 120,
            unit_price_cents: 350,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn warehouse_item(store: &MemoryStore, name: &str) -> DbId {
    store
        .insert(WarehouseItem {
            id: 0,
            name: name.to_string(),
            quantity: 10,
            location: Some("Shelf A".to_string()),
            lifecycle: Lifecycle::Active,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn employee(store: &MemoryStore, name: &str) -> DbId {
    store
        .insert(Employee {
            id: 0,
            name: name.to_string(),
            email: None,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn permission(store: &MemoryStore, employee_id: DbId, permission: &str) -> DbId {
    store
        .insert(EmployeePermission {
            id: 0,
            employee_id,
            permission: permission.to_string(),
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn tool(store: &MemoryStore, name: &str) -> DbId {
    store
        .insert(Tool {
            id: 0,
            name: name.to_string(),
            serial_number: None,
            qr_code: None,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn assign(store: &MemoryStore, tool_id: DbId, employee_id: DbId) -> DbId {
    store
        .insert(ToolAssignment {
            id: 0,
            tool_id,
            employee_id,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn protocol(store: &MemoryStore, tool_id: DbId, number: &str) -> DbId {
    store
        .insert(Protocol {
            id: 0,
            tool_id,
            number: number.to_string(),
            inspected_at: Utc::now(),
            notes: None,
            created_at: Utc::now(),
        })
        .await
        .id()
}

/// Lifecycle of a stored row; panics if the row is missing or has none.
pub async fn lifecycle_of(store: &MemoryStore, kind: RecordKind, id: DbId) -> Lifecycle {
    store
        .get(kind, id)
        .await
        .and_then(|r| r.lifecycle())
        .unwrap_or_else(|| panic!("{kind} {id} missing or without lifecycle"))
}

pub async fn exists(store: &MemoryStore, kind: RecordKind, id: DbId) -> bool {
    store.get(kind, id).await.is_some()
}

/// Rows of `kind` that reference `parent`/`parent_id`.
pub async fn children(
    store: &MemoryStore,
    kind: RecordKind,
    parent: RecordKind,
    parent_id: DbId,
) -> Vec<Record> {
    store
        .rows(kind)
        .await
        .into_iter()
        .filter(|r| r.reference(parent) == Some(parent_id))
        .collect()
}
