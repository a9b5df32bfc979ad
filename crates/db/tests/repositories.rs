//! Repository-level behaviour that does not go through the lifecycle engine.
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

use assert_matches::assert_matches;
use bizdesk_core::error::CoreError;
use bizdesk_db::models::client::{CreateClient, UpdateClient};
use bizdesk_db::models::employee::{CreateEmployee, GrantPermission};
use bizdesk_db::models::project::CreateProject;
use bizdesk_db::models::tool::{CreateProtocol, CreateTool};
use bizdesk_db::repositories::{ClientRepo, EmployeeRepo, ProjectRepo, ProtocolRepo, ToolRepo};
use bizdesk_db::RepoError;
use sqlx::PgPool;

async fn new_tool(pool: &PgPool, qr_code: &str) -> i64 {
    ToolRepo::create(
        pool,
        &CreateTool {
            name: "Angle grinder".to_string(),
            serial_number: Some("AG-100".to_string()),
            qr_code: Some(qr_code.to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

fn inspection(tool_id: i64) -> CreateProtocol {
    CreateProtocol {
        tool_id,
        inspected_at: chrono::Utc::now(),
        notes: Some("ok".to_string()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_applies_only_given_fields(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Acme".to_string(),
            email: Some("office@acme.test".to_string()),
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap();

    let updated = ClientRepo::update(
        &pool,
        client.id,
        &UpdateClient {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Acme");
    assert_eq!(updated.email.as_deref(), Some("office@acme.test"));
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_protocol_numbers_are_sequential_per_tool(pool: PgPool) {
    let first_tool = new_tool(&pool, "QR-A").await;
    let second_tool = new_tool(&pool, "QR-B").await;

    let a1 = ProtocolRepo::create(&pool, &inspection(first_tool))
        .await
        .unwrap()
        .unwrap();
    let a2 = ProtocolRepo::create(&pool, &inspection(first_tool))
        .await
        .unwrap()
        .unwrap();
    let b1 = ProtocolRepo::create(&pool, &inspection(second_tool))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(a1.number, format!("P-{first_tool}-001"));
    assert_eq!(a2.number, format!("P-{first_tool}-002"));
    assert_eq!(b1.number, format!("P-{second_tool}-001"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_protocol_for_missing_tool_returns_none(pool: PgPool) {
    let created = ProtocolRepo::create(&pool, &inspection(9_999)).await.unwrap();
    assert!(created.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_qr_code_violates_unique_constraint(pool: PgPool) {
    new_tool(&pool, "QR-DUP").await;

    let err = ToolRepo::create(
        &pool,
        &CreateTool {
            name: "Second".to_string(),
            serial_number: None,
            qr_code: Some("QR-DUP".to_string()),
        },
    )
    .await
    .unwrap_err();

    let RepoError::Database(err) = err else {
        panic!("expected a database error, got {err:?}");
    };
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_tools_qr_code"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_rejects_invalid_input_before_inserting(pool: PgPool) {
    let err = ClientRepo::create(
        &pool,
        &CreateClient {
            name: String::new(),
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, RepoError::Invalid(CoreError::Validation(_)));

    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Acme".to_string(),
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap();
    let err = ProjectRepo::create(
        &pool,
        &CreateProject {
            client_id: client.id,
            name: "Roof repair".to_string(),
            description: None,
            budget_cents: Some(-1),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, RepoError::Invalid(CoreError::Validation(msg)) if msg.contains("budget_cents"));

    let (clients,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (projects,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((clients, projects), (1, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_grant_permission_is_idempotent(pool: PgPool) {
    let employee = EmployeeRepo::create(
        &pool,
        &CreateEmployee {
            name: "Sam".to_string(),
            email: None,
        },
    )
    .await
    .unwrap();
    let grant = GrantPermission {
        permission: "warehouse.edit".to_string(),
    };

    let first = EmployeeRepo::grant_permission(&pool, employee.id, &grant)
        .await
        .unwrap();
    let second = EmployeeRepo::grant_permission(&pool, employee.id, &grant)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    let permissions = EmployeeRepo::list_permissions(&pool, employee.id)
        .await
        .unwrap();
    assert_eq!(permissions.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_tools_swaps_assignments(pool: PgPool) {
    let employee = EmployeeRepo::create(
        &pool,
        &CreateEmployee {
            name: "Sam".to_string(),
            email: None,
        },
    )
    .await
    .unwrap();
    let saw = new_tool(&pool, "QR-SAW").await;
    let drill = new_tool(&pool, "QR-DRILL").await;

    EmployeeRepo::replace_tools(&pool, employee.id, &[saw]).await.unwrap();
    EmployeeRepo::replace_tools(&pool, employee.id, &[drill]).await.unwrap();

    let tools: Vec<i64> = EmployeeRepo::list_tools(&pool, employee.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.tool_id)
        .collect();
    assert_eq!(tools, vec![drill]);
}
