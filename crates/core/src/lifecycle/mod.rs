//! Soft-delete lifecycle of business records.
//!
//! - [`kind`]: closed enumerations of record kinds.
//! - [`state`]: the `is_deleted` / `deleted_at` pair as one value.
//! - [`record`]: typed records and the soft/hard delete capability traits.
//! - [`policy`]: per-kind guard, cascade and restore rules.
//! - [`store`]: the transactional store contract.
//! - [`engine`]: soft delete, restore, purge and trash views.
//! - [`memory`]: an in-process store.

pub mod engine;
pub mod error;
pub mod kind;
pub mod memory;
pub mod policy;
pub mod record;
pub mod state;
pub mod store;
pub mod trash;

pub use engine::{LifecycleEngine, Transition};
pub use error::{LifecycleError, LifecycleResult};
pub use kind::{EntityKind, RecordKind, UnknownKind};
pub use memory::MemoryStore;
pub use record::{HardDeleteOnly, Record, SoftDeletable};
pub use state::{DeletionFlag, InvalidLifecycle, Lifecycle, LifecycleColumns};
pub use store::{EntityStore, Filter, ParentRef, Patch, StateFilter, StoreError, StoreResult, StoreTx};
pub use trash::{PurgeCount, PurgePreview, TrashSnapshot, TrashSummary, TrashedItem};
