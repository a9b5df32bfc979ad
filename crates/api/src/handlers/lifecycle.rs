//! Handlers for deleting records and inspecting their dependents.
//!
//! `DELETE /{entity_type}/{id}` moves soft-deletable kinds to the trash and
//! removes hard-delete-only kinds outright.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bizdesk_core::lifecycle::record::{
    CostEstimateItem, Employee, EmployeePermission, QuotationItem, Tool,
};
use bizdesk_core::lifecycle::{EntityKind, EntityStore, RecordKind, Transition};
use bizdesk_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a soft delete.
#[derive(Debug, Serialize)]
pub struct SoftDeleted {
    pub entity_type: EntityKind,
    pub id: DbId,
    /// `true` if the record was already in the trash and nothing changed.
    pub already_deleted: bool,
}

/// Live dependents blocking a delete.
#[derive(Debug, Serialize)]
pub struct Dependents {
    pub entity_type: EntityKind,
    pub id: DbId,
    pub active_dependents: i64,
}

/// DELETE /api/v1/{entity_type}/{id}
///
/// Soft-deletable kinds answer 200 with a [`SoftDeleted`] body; deleting an
/// already deleted record succeeds with `already_deleted: true`. Hard-delete
/// kinds answer 204.
pub async fn delete_entity<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<Response> {
    let kind: RecordKind = entity_type.parse()?;

    if let Some(kind) = kind.entity_kind() {
        let transition = state.engine.soft_delete(kind, id).await?;
        let already_deleted = transition == Transition::Unchanged;
        if !already_deleted {
            tracing::info!(entity_type = %kind, id, "Moved to trash");
        }
        let body = DataResponse {
            data: SoftDeleted {
                entity_type: kind,
                id,
                already_deleted,
            },
        };
        return Ok(Json(body).into_response());
    }

    let engine = &state.engine;
    match kind {
        RecordKind::CostEstimateItem => engine.hard_delete::<CostEstimateItem>(id).await?,
        RecordKind::QuotationItem => engine.hard_delete::<QuotationItem>(id).await?,
        RecordKind::EmployeePermission => engine.hard_delete::<EmployeePermission>(id).await?,
        RecordKind::Employee => engine.hard_delete::<Employee>(id).await?,
        RecordKind::Tool => engine.hard_delete::<Tool>(id).await?,
        other => {
            return Err(AppError::BadRequest(format!(
                "Entity type {other} cannot be deleted directly"
            )))
        }
    }
    tracing::info!(entity_type = %kind, id, "Deleted permanently");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// GET /api/v1/{entity_type}/{id}/dependents
///
/// Count the live dependents that would block a soft delete. Kinds without
/// a guard always report zero.
pub async fn dependents<S: EntityStore>(
    State(state): State<AppState<S>>,
    Path((entity_type, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Dependents>>> {
    let kind: EntityKind = entity_type.parse()?;
    let active_dependents = state.engine.has_active_dependents(kind, id).await?;
    Ok(Json(DataResponse {
        data: Dependents {
            entity_type: kind,
            id,
            active_dependents,
        },
    }))
}
