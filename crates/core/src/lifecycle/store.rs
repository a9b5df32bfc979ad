//! Contract between the lifecycle engine and a persistent entity store.
//!
//! Every engine operation runs inside one [`StoreTx`]. A transaction that is
//! dropped without [`StoreTx::commit`] must leave the store unchanged.

use async_trait::async_trait;

use super::kind::{EntityKind, RecordKind};
use super::policy;
use super::record::Record;
use super::state::Lifecycle;
use crate::types::DbId;

/// Errors raised by an entity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("entity store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Wrap a backend error (driver, pool, I/O).
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Unavailable(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A reference to one parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentRef {
    pub kind: RecordKind,
    pub id: DbId,
}

impl ParentRef {
    pub fn new(kind: impl Into<RecordKind>, id: DbId) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

/// Which lifecycle states a query matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateFilter {
    #[default]
    Any,
    Active,
    Deleted,
}

impl StateFilter {
    pub fn matches(self, lifecycle: Option<Lifecycle>) -> bool {
        match (self, lifecycle) {
            (StateFilter::Any, _) => true,
            (StateFilter::Active, Some(l)) => !l.is_deleted(),
            (StateFilter::Deleted, Some(l)) => l.is_deleted(),
            (_, None) => false,
        }
    }
}

/// Row filter for `count`, `find_many` and `delete_many`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    pub parent: Option<ParentRef>,
    pub state: StateFilter,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn deleted() -> Self {
        Self {
            parent: None,
            state: StateFilter::Deleted,
        }
    }

    pub fn children_of(parent: ParentRef) -> Self {
        Self {
            parent: Some(parent),
            state: StateFilter::Any,
        }
    }

    pub fn active(mut self) -> Self {
        self.state = StateFilter::Active;
        self
    }

    pub fn only_deleted(mut self) -> Self {
        self.state = StateFilter::Deleted;
        self
    }

    /// Reject filters that cannot apply to `kind`: a lifecycle state on a
    /// kind without one, or a parent the kind does not reference.
    pub fn check(&self, kind: RecordKind) -> StoreResult<()> {
        if self.state != StateFilter::Any && !kind.has_lifecycle() {
            return Err(StoreError::InvalidFilter(format!(
                "{kind} has no lifecycle state"
            )));
        }
        if let Some(parent) = self.parent {
            if policy::reference_between(kind, parent.kind).is_none() {
                return Err(StoreError::InvalidFilter(format!(
                    "{kind} does not reference {}",
                    parent.kind
                )));
            }
        }
        Ok(())
    }

    /// In-memory evaluation, for stores that hold records directly.
    pub fn matches(&self, record: &Record) -> bool {
        let parent_ok = match self.parent {
            Some(parent) => record.reference(parent.kind) == Some(parent.id),
            None => true,
        };
        parent_ok && self.state.matches(record.lifecycle())
    }
}

/// Field changes the engine may apply through [`StoreTx::update`].
///
/// Lifecycle flag and timestamp always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    Lifecycle(Lifecycle),
}

/// A store that hands out transactions.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    type Tx: StoreTx;

    async fn begin(&self) -> StoreResult<Self::Tx>;

    /// Cheap liveness probe used by health checks.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Unit of work against the store.
#[async_trait]
pub trait StoreTx: Send {
    /// Fetch one row, locking it against concurrent writers until the
    /// transaction ends.
    async fn find(&mut self, kind: RecordKind, id: DbId) -> StoreResult<Option<Record>>;

    /// Apply `patch`, returning the updated row or `None` if it is absent.
    async fn update(
        &mut self,
        kind: EntityKind,
        id: DbId,
        patch: Patch,
    ) -> StoreResult<Option<Record>>;

    /// Remove one row. Returns `false` if it did not exist.
    async fn delete(&mut self, kind: RecordKind, id: DbId) -> StoreResult<bool>;

    /// Remove every row matching `filter`, returning how many went.
    async fn delete_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<u64>;

    /// Null out the nullable reference from `kind` rows to `parent`.
    async fn detach(&mut self, kind: RecordKind, parent: ParentRef) -> StoreResult<u64>;

    async fn count(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<i64>;

    async fn find_many(&mut self, kind: RecordKind, filter: &Filter) -> StoreResult<Vec<Record>>;

    async fn commit(self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_filter_on_hard_delete_kind_is_invalid() {
        let err = Filter::deleted()
            .check(RecordKind::CostEstimateItem)
            .unwrap_err();
        assert!(err.to_string().contains("cost_estimate_items has no lifecycle state"));
        assert!(Filter::all().check(RecordKind::CostEstimateItem).is_ok());
    }

    #[test]
    fn parent_filter_must_follow_a_reference() {
        let by_client = Filter::children_of(ParentRef::new(EntityKind::Client, 1));
        assert!(by_client.check(RecordKind::Project).is_ok());
        assert!(by_client.check(RecordKind::Task).is_err());
    }

    #[test]
    fn state_filter_matches_lifecycle() {
        let now = chrono::Utc::now();
        assert!(StateFilter::Active.matches(Some(Lifecycle::Active)));
        assert!(!StateFilter::Active.matches(Some(Lifecycle::deleted(now))));
        assert!(StateFilter::Deleted.matches(Some(Lifecycle::deleted(now))));
        assert!(!StateFilter::Deleted.matches(None));
        assert!(StateFilter::Any.matches(None));
    }
}
