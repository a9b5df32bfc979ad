//! The lifecycle engine running against PostgreSQL.
//!
//! Exercises [`PgEntityStore`] through the engine to verify that:
//! - Soft delete flips both lifecycle columns and hides rows from repo reads
//! - The client guard counts only active projects
//! - Project purge removes every owned child in one transaction
//! - Supplier purge detaches orders instead of deleting them
//! - Emptying the trash leaves active rows alone
//!
//! These need a live database: run with `DATABASE_URL` set and
//! `cargo test -- --ignored`.

use assert_matches::assert_matches;
use bizdesk_core::lifecycle::record::{Employee, Tool};
use bizdesk_core::lifecycle::{
    EntityKind, EntityStore, Filter, LifecycleEngine, LifecycleError, RecordKind, StoreTx,
    Transition,
};
use bizdesk_db::models::client::CreateClient;
use bizdesk_db::models::employee::CreateEmployee;
use bizdesk_db::models::estimate::CreateLineItem;
use bizdesk_db::models::order::CreateOrder;
use bizdesk_db::models::project::CreateProject;
use bizdesk_db::models::supplier::CreateSupplier;
use bizdesk_db::models::task::CreateTask;
use bizdesk_db::models::tool::{CreateProtocol, CreateTool};
use bizdesk_db::repositories::{
    ClientRepo, CostEstimateRepo, EmployeeRepo, OrderRepo, ProjectRepo, ProtocolRepo,
    SupplierRepo, TaskRepo, ToolRepo,
};
use bizdesk_db::PgEntityStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn engine(pool: &PgPool) -> LifecycleEngine<PgEntityStore> {
    LifecycleEngine::new(PgEntityStore::new(pool.clone()))
}

async fn new_client(pool: &PgPool, name: &str) -> i64 {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_project(pool: &PgPool, client_id: i64) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            client_id,
            name: "Roof repair".to_string(),
            description: None,
            budget_cents: Some(2_500_000),
        },
    )
    .await
    .unwrap()
    .expect("client is active")
    .id
}

async fn new_supplier(pool: &PgPool) -> i64 {
    SupplierRepo::create(
        pool,
        &CreateSupplier {
            name: "Timber Ltd".to_string(),
            contact_person: None,
            email: None,
            phone: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_order(pool: &PgPool, project_id: i64, supplier_id: Option<i64>) -> i64 {
    OrderRepo::create(
        pool,
        &CreateOrder {
            project_id,
            supplier_id,
            task_id: None,
            title: "Beams".to_string(),
            amount_cents: Some(90_000),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Soft delete and restore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_soft_delete_sets_both_columns(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;

    let outcome = engine(&pool)
        .soft_delete(EntityKind::Client, client_id)
        .await
        .unwrap();
    assert_eq!(outcome, Transition::Applied);

    let (flag, deleted_at): (i16, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT is_deleted, deleted_at FROM clients WHERE id = $1")
            .bind(client_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(flag, 1);
    assert!(deleted_at.is_some());

    assert!(ClientRepo::find_by_id(&pool, client_id).await.unwrap().is_none());
    assert!(ClientRepo::find_by_id_include_deleted(&pool, client_id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_restore_clears_both_columns(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Client, client_id).await.unwrap();

    engine.restore(EntityKind::Client, client_id).await.unwrap();

    let (flag, deleted_at): (i16, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT is_deleted, deleted_at FROM clients WHERE id = $1")
            .bind(client_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(flag, 0);
    assert!(deleted_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_client_guard_counts_active_projects_only(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let kept = new_project(&pool, client_id).await;
    let trashed = new_project(&pool, client_id).await;
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Project, trashed).await.unwrap();

    let count = engine
        .has_active_dependents(EntityKind::Client, client_id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let err = engine
        .soft_delete(EntityKind::Client, client_id)
        .await
        .unwrap_err();
    assert_matches!(err, LifecycleError::HasActiveDependents { count: 1, .. });

    engine.soft_delete(EntityKind::Project, kept).await.unwrap();
    engine.soft_delete(EntityKind::Client, client_id).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_project_cannot_be_created_under_deleted_client(pool: PgPool) {
    let client_id = new_client(&pool, "Gone").await;
    engine(&pool)
        .soft_delete(EntityKind::Client, client_id)
        .await
        .unwrap();

    let created = ProjectRepo::create(
        &pool,
        &CreateProject {
            client_id,
            name: "Orphan".to_string(),
            description: None,
            budget_cents: None,
        },
    )
    .await
    .unwrap();
    assert!(created.is_none());
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_purge_project_removes_owned_children(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let project_id = new_project(&pool, client_id).await;
    new_order(&pool, project_id, None).await;
    TaskRepo::create(
        &pool,
        &CreateTask {
            project_id,
            title: "Survey".to_string(),
        },
    )
    .await
    .unwrap();
    for _ in 0..3 {
        CostEstimateRepo::create(
            &pool,
            &CreateLineItem {
                project_id,
                description: "Tiles".to_string(),
                quantity: 10,
                unit_price_cents: 250,
            },
        )
        .await
        .unwrap();
    }
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Project, project_id).await.unwrap();

    engine.purge(EntityKind::Project, project_id).await.unwrap();

    assert!(ProjectRepo::find_by_id_include_deleted(&pool, project_id)
        .await
        .unwrap()
        .is_none());
    assert!(CostEstimateRepo::list_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_empty());
    let (orders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_purge_supplier_detaches_orders(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let project_id = new_project(&pool, client_id).await;
    let supplier_id = new_supplier(&pool).await;
    let order_id = new_order(&pool, project_id, Some(supplier_id)).await;
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Supplier, supplier_id).await.unwrap();

    engine.purge(EntityKind::Supplier, supplier_id).await.unwrap();

    let order = OrderRepo::find_by_id(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(order.supplier_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_purge_project_detaches_foreign_orders_from_its_tasks(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let doomed = new_project(&pool, client_id).await;
    let survivor = new_project(&pool, client_id).await;
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: doomed,
            title: "Survey".to_string(),
        },
    )
    .await
    .unwrap();
    let order = OrderRepo::create(
        &pool,
        &CreateOrder {
            project_id: survivor,
            supplier_id: None,
            task_id: Some(task.id),
            title: "Scaffolding".to_string(),
            amount_cents: None,
        },
    )
    .await
    .unwrap();

    engine(&pool).purge(EntityKind::Project, doomed).await.unwrap();

    let order = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(order.task_id, None);
    assert_eq!(order.project_id, survivor);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_purge_client_with_deleted_project_is_refused(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    let project_id = new_project(&pool, client_id).await;
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Project, project_id).await.unwrap();
    engine.soft_delete(EntityKind::Client, client_id).await.unwrap();

    let err = engine.purge(EntityKind::Client, client_id).await.unwrap_err();

    assert_matches!(err, LifecycleError::HasDeletedDependents { count: 1, .. });
    assert!(ClientRepo::find_by_id_include_deleted(&pool, client_id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_hard_delete_tool_removes_protocols(pool: PgPool) {
    let tool = ToolRepo::create(
        &pool,
        &CreateTool {
            name: "Drill".to_string(),
            serial_number: None,
            qr_code: Some("QR-1".to_string()),
        },
    )
    .await
    .unwrap();
    let employee = EmployeeRepo::create(
        &pool,
        &CreateEmployee {
            name: "Dana".to_string(),
            email: None,
        },
    )
    .await
    .unwrap();
    EmployeeRepo::replace_tools(&pool, employee.id, &[tool.id])
        .await
        .unwrap();
    ProtocolRepo::create(
        &pool,
        &CreateProtocol {
            tool_id: tool.id,
            inspected_at: chrono::Utc::now(),
            notes: None,
        },
    )
    .await
    .unwrap();

    let engine = engine(&pool);
    engine.hard_delete::<Tool>(tool.id).await.unwrap();

    assert!(ToolRepo::find_by_id(&pool, tool.id).await.unwrap().is_none());
    assert!(ProtocolRepo::list_by_tool(&pool, tool.id).await.unwrap().is_empty());
    assert!(EmployeeRepo::list_tools(&pool, employee.id)
        .await
        .unwrap()
        .is_empty());

    engine.hard_delete::<Employee>(employee.id).await.unwrap();
    assert!(EmployeeRepo::find_by_id(&pool, employee.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Trash
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_trash_leaves_active_rows(pool: PgPool) {
    let keep = new_client(&pool, "Keep").await;
    let drop_id = new_client(&pool, "Drop").await;
    let live_project = new_project(&pool, keep).await;
    let engine = engine(&pool);
    engine.soft_delete(EntityKind::Client, drop_id).await.unwrap();

    let purged = engine.empty_trash().await.unwrap();

    assert_eq!(purged, 1);
    assert!(ClientRepo::find_by_id(&pool, keep).await.unwrap().is_some());
    assert!(ProjectRepo::find_by_id(&pool, live_project)
        .await
        .unwrap()
        .is_some());
    assert!(engine.list_deleted().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_filters_by_parent_and_state(pool: PgPool) {
    let client_id = new_client(&pool, "Acme").await;
    new_project(&pool, client_id).await;
    let trashed = new_project(&pool, client_id).await;
    engine(&pool)
        .soft_delete(EntityKind::Project, trashed)
        .await
        .unwrap();

    let store = PgEntityStore::new(pool.clone());
    let mut tx = store.begin().await.unwrap();
    let parent = bizdesk_core::lifecycle::ParentRef::new(RecordKind::Client, client_id);
    let all = tx
        .count(RecordKind::Project, &Filter::children_of(parent))
        .await
        .unwrap();
    let deleted = tx
        .find_many(RecordKind::Project, &Filter::children_of(parent).only_deleted())
        .await
        .unwrap();

    assert_eq!(all, 2);
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id(), trashed);
}
