use super::kind::RecordKind;
use super::store::StoreError;
use crate::types::DbId;

/// Failures of the lifecycle engine.
///
/// Variants carry structured data only; callers build user-facing text.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: DbId },

    #[error("{kind} {id} has {count} active {dependent}")]
    HasActiveDependents {
        kind: RecordKind,
        id: DbId,
        dependent: RecordKind,
        count: i64,
    },

    #[error("{kind} {id} is still referenced by {count} deleted {dependent}")]
    HasDeletedDependents {
        kind: RecordKind,
        id: DbId,
        dependent: RecordKind,
        count: i64,
    },

    #[error("{kind} {id} is not deleted")]
    NotDeleted { kind: RecordKind, id: DbId },

    #[error("{kind} {id} cannot be restored while {parent} {parent_id} is deleted")]
    ParentDeleted {
        kind: RecordKind,
        id: DbId,
        parent: RecordKind,
        parent_id: DbId,
    },

    #[error("failed to remove {child} owned by {kind} {id}")]
    DependentCleanupFailed {
        kind: RecordKind,
        id: DbId,
        child: RecordKind,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
