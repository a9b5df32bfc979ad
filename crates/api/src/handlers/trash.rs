//! Handlers for the `/trash` resource.
//!
//! A unified trash API over every soft-deletable kind: listing trashed
//! items, restoring them, previewing a purge, and permanently removing
//! individual or all trashed records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bizdesk_core::lifecycle::{
    EntityKind, EntityStore, PurgePreview, Record, TrashSnapshot, TrashSummary,
};
use bizdesk_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the trash listing endpoint.
#[derive(Debug, Deserialize)]
pub struct TrashQuery {
    /// Optional entity type filter (e.g. "projects", "clients").
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
}

/// Result of emptying the trash.
#[derive(Debug, Serialize)]
pub struct Purged {
    pub purged: u64,
}

/// GET /api/v1/trash
///
/// List all soft-deleted items, optionally filtered by entity type.
pub async fn list_trashed<S: EntityStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<TrashQuery>,
) -> AppResult<Json<TrashSummary>> {
    let kind = params
        .entity_type
        .as_deref()
        .map(parse_entity_type)
        .transpose()?;
    let summary = state.engine.list_trashed(kind).await?;
    Ok(Json(summary))
}

/// GET /api/v1/trash/snapshot
///
/// Deleted projects, clients, suppliers and orders as full records.
pub async fn snapshot<S: EntityStore>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<DataResponse<TrashSnapshot>>> {
    let snapshot = state.engine.list_deleted().await?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/trash/{entity_type}/{id}/restore
///
/// Restore a soft-deleted record and return it. Returns 409 if the record
/// is not in the trash or its parent is still trashed, 404 if it does not
/// exist.
pub async fn restore<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Record>>> {
    let kind = parse_entity_type(&entity_type)?;
    let record = state.engine.restore(kind, id).await?;
    tracing::info!(entity_type = %kind, id, "Restored from trash");
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/trash/purge
///
/// Permanently remove every soft-deleted record.
pub async fn purge_all<S: EntityStore>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<DataResponse<Purged>>> {
    let purged = state.engine.empty_trash().await?;
    tracing::info!(purged, "Emptied trash");
    Ok(Json(DataResponse {
        data: Purged { purged },
    }))
}

/// DELETE /api/v1/trash/{entity_type}/{id}/purge
///
/// Permanently remove a single record together with the children it owns.
pub async fn purge_one<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_entity_type(&entity_type)?;
    state.engine.purge(kind, id).await?;
    tracing::info!(entity_type = %kind, id, "Purged");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/trash/purge-preview
///
/// How many rows a purge-all would remove, broken down by entity type.
pub async fn purge_preview<S: EntityStore>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<PurgePreview>> {
    let preview = state.engine.purge_preview().await?;
    Ok(Json(preview))
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Parse one of the soft-deletable table names.
fn parse_entity_type(entity_type: &str) -> AppResult<EntityKind> {
    Ok(entity_type.parse()?)
}
