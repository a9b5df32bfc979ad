//! Per-kind lifecycle rules.
//!
//! The engine is one generic routine; everything kind-specific lives in the
//! static tables below: which references exist, which dependents block a
//! delete, which children are removed along with a purged parent, which
//! nullable references are cleared, and which parent must be live before a
//! restore.

use super::kind::{EntityKind, RecordKind};

/// A foreign-key style reference from `child` rows to `parent` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub child: RecordKind,
    pub parent: RecordKind,
    /// Column on the child table holding the parent id.
    pub column: &'static str,
    pub nullable: bool,
    /// Whether the store refuses to remove a parent that is still referenced.
    pub enforced: bool,
}

const fn reference(
    child: RecordKind,
    parent: RecordKind,
    column: &'static str,
    nullable: bool,
    enforced: bool,
) -> Reference {
    Reference {
        child,
        parent,
        column,
        nullable,
        enforced,
    }
}

/// Every reference in the data model.
pub const REFERENCES: &[Reference] = &[
    reference(RecordKind::Project, RecordKind::Client, "client_id", false, true),
    reference(RecordKind::Order, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::Order, RecordKind::Supplier, "supplier_id", true, true),
    // Informational only; an order may point at a task that no longer exists.
    reference(RecordKind::Order, RecordKind::Task, "task_id", true, false),
    reference(RecordKind::Task, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::Expense, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::Resource, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::CostEstimateItem, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::QuotationItem, RecordKind::Project, "project_id", false, true),
    reference(RecordKind::EmployeePermission, RecordKind::Employee, "employee_id", false, true),
    reference(RecordKind::ToolAssignment, RecordKind::Tool, "tool_id", false, true),
    reference(RecordKind::ToolAssignment, RecordKind::Employee, "employee_id", false, true),
    reference(RecordKind::Protocol, RecordKind::Tool, "tool_id", false, true),
];

/// Look up the reference from `child` to `parent`, if the schema has one.
pub fn reference_between(child: RecordKind, parent: RecordKind) -> Option<&'static Reference> {
    REFERENCES
        .iter()
        .find(|r| r.child == child && r.parent == parent)
}

/// Enforced references pointing at `parent`.
pub fn enforced_references_to(parent: RecordKind) -> impl Iterator<Item = &'static Reference> {
    REFERENCES
        .iter()
        .filter(move |r| r.parent == parent && r.enforced)
}

/// Dependents that must not be live when a record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardRule {
    pub dependent: RecordKind,
}

/// The referential guard for `kind`.
///
/// Only clients are guarded. Supplier deletion does not look at the
/// supplier's orders; that asymmetry is the observed behaviour and is kept
/// until a product decision says otherwise.
pub fn guard_for(kind: EntityKind) -> Option<GuardRule> {
    match kind {
        EntityKind::Client => Some(GuardRule {
            dependent: RecordKind::Project,
        }),
        EntityKind::Supplier => None,
        EntityKind::Project
        | EntityKind::Order
        | EntityKind::Task
        | EntityKind::Expense
        | EntityKind::Resource
        | EntityKind::WarehouseItem => None,
    }
}

/// Children removed together with a purged parent, in deletion order.
///
/// Orders go before tasks so an order never outlives the task rows of the
/// same project inside one purge.
pub fn owned_children(kind: RecordKind) -> &'static [RecordKind] {
    match kind {
        RecordKind::Project => &[
            RecordKind::Order,
            RecordKind::Task,
            RecordKind::Expense,
            RecordKind::Resource,
            RecordKind::QuotationItem,
            RecordKind::CostEstimateItem,
        ],
        RecordKind::Tool => &[RecordKind::ToolAssignment, RecordKind::Protocol],
        RecordKind::Employee => &[RecordKind::ToolAssignment, RecordKind::EmployeePermission],
        _ => &[],
    }
}

/// Kinds whose nullable reference to `kind` is cleared when `kind` is purged.
pub fn detached_on_purge(kind: RecordKind) -> &'static [RecordKind] {
    match kind {
        RecordKind::Supplier | RecordKind::Task => &[RecordKind::Order],
        _ => &[],
    }
}

/// The parent that must be live before a record of `kind` is restored.
pub fn restore_parent(kind: EntityKind) -> Option<RecordKind> {
    match kind {
        EntityKind::Project => Some(RecordKind::Client),
        _ => None,
    }
}

/// Order in which the trash is emptied: leaves first, roots last.
pub const PURGE_ORDER: [EntityKind; 8] = [
    EntityKind::Order,
    EntityKind::Task,
    EntityKind::Expense,
    EntityKind::Resource,
    EntityKind::WarehouseItem,
    EntityKind::Project,
    EntityKind::Client,
    EntityKind::Supplier,
];
