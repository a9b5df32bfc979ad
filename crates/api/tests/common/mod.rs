#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bizdesk_core::lifecycle::record::{Client, Project, Supplier, Tool};
use bizdesk_core::lifecycle::{Lifecycle, MemoryStore};
use bizdesk_core::types::DbId;
use chrono::{Duration as ChronoDuration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use bizdesk_api::config::ServerConfig;
use bizdesk_api::routes;
use bizdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
    }
}

/// Build the full application router with all middleware layers on top of
/// the given in-memory store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: MemoryStore) -> Router {
    let state = AppState::new(store, test_config());

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub fn deleted_minutes_ago(minutes: i64) -> Lifecycle {
    Lifecycle::deleted(Utc::now() - ChronoDuration::minutes(minutes))
}

pub async fn seed_client(store: &MemoryStore, name: &str, lifecycle: Lifecycle) -> DbId {
    store
        .insert(Client {
            id: 0,
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

pub async fn seed_project(store: &MemoryStore, client_id: DbId, lifecycle: Lifecycle) -> DbId {
    store
        .insert(Project {
            id: 0,
            client_id,
            name: "Kitchen refit".to_string(),
            description: None,
            budget_cents: None,
            lifecycle,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn seed_supplier(store: &MemoryStore, lifecycle: Lifecycle) -> DbId {
    store
        .insert(Supplier {
            id: 0,
            name: "Bricks & Co".to_string(),
            contact_person: None,
            email: None,
            phone: None,
            lifecycle,
            created_at: Utc::now(),
        })
        .await
        .id()
}

pub async fn seed_tool(store: &MemoryStore) -> DbId {
    store
        .insert(Tool {
            id: 0,
            name: "Laser level".to_string(),
            serial_number: None,
            qr_code: None,
            created_at: Utc::now(),
        })
        .await
        .id()
}
