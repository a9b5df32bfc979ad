use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bizdesk_core::lifecycle::{LifecycleError, StoreError, UnknownKind};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`LifecycleError`] and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A soft-delete, restore or purge that the lifecycle engine refused.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<UnknownKind> for AppError {
    fn from(err: UnknownKind) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Lifecycle(err) => classify_lifecycle_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        // Refusals caused by dependents also carry how many there are.
        if let AppError::Lifecycle(
            LifecycleError::HasActiveDependents { count, .. }
            | LifecycleError::HasDeletedDependents { count, .. },
        ) = &self
        {
            body["count"] = json!(count);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Build the user-facing status, code and message for a lifecycle failure.
///
/// Refusals (dependents, wrong state, deleted parent) are 409 and logged at
/// `warn`. Cleanup failures and store faults are logged at `error` and their
/// detail is not sent to the client.
fn classify_lifecycle_error(err: &LifecycleError) -> (StatusCode, &'static str, String) {
    match err {
        LifecycleError::NotFound { kind, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{} with id {id} not found", kind.label()),
        ),
        LifecycleError::HasActiveDependents {
            kind,
            id,
            dependent,
            count,
        } => {
            tracing::warn!(%kind, id, %dependent, count, "Delete blocked by active dependents");
            (
                StatusCode::CONFLICT,
                "HAS_ACTIVE_DEPENDENTS",
                format!(
                    "Cannot delete {} {id}: it still has {count} active {dependent}",
                    kind.label()
                ),
            )
        }
        LifecycleError::HasDeletedDependents {
            kind,
            id,
            dependent,
            count,
        } => {
            tracing::warn!(%kind, id, %dependent, count, "Purge blocked by deleted dependents");
            (
                StatusCode::CONFLICT,
                "HAS_DELETED_DEPENDENTS",
                format!(
                    "Cannot purge {} {id}: {count} deleted {dependent} still reference it",
                    kind.label()
                ),
            )
        }
        LifecycleError::NotDeleted { kind, id } => (
            StatusCode::CONFLICT,
            "NOT_DELETED",
            format!("{} {id} is not in the trash", kind.label()),
        ),
        LifecycleError::ParentDeleted {
            kind,
            id,
            parent,
            parent_id,
        } => {
            tracing::warn!(%kind, id, %parent, parent_id, "Restore blocked by deleted parent");
            (
                StatusCode::CONFLICT,
                "PARENT_DELETED",
                format!(
                    "Restore {} {parent_id} before restoring {} {id}",
                    parent.label(),
                    kind.label()
                ),
            )
        }
        LifecycleError::DependentCleanupFailed {
            kind,
            id,
            child,
            source,
        } => {
            tracing::error!(%kind, id, %child, error = %source, "Dependent cleanup failed");
            internal()
        }
        LifecycleError::StoreUnavailable(source) => classify_store_error(source),
    }
}

fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Unavailable(source) => {
            tracing::error!(error = %source, "Entity store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "The data store is temporarily unavailable".to_string(),
            )
        }
        StoreError::Constraint(msg) => {
            tracing::warn!(error = %msg, "Constraint violation");
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                "The record is still referenced by other records".to_string(),
            )
        }
        StoreError::InvalidFilter(_) | StoreError::Corrupt(_) => {
            tracing::error!(error = %err, "Entity store error");
            internal()
        }
    }
}
