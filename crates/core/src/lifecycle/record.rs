//! Typed records for every kind held by the entity store.
//!
//! Each kind has its own struct; [`Record`] is the sum type the store
//! contract traffics in. The two capability traits split the kinds by how
//! they leave the system: [`SoftDeletable`] records go through the trash,
//! [`HardDeleteOnly`] records are removed immediately.

use serde::Serialize;

use super::kind::{EntityKind, RecordKind};
use super::state::Lifecycle;
use crate::types::{Cents, DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub budget_cents: Option<Cents>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

/// A purchase order. `task_id` is an informational cross-reference and is
/// not enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: DbId,
    pub project_id: DbId,
    pub supplier_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub title: String,
    pub amount_cents: Option<Cents>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub done: bool,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub amount_cents: Cents,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub quantity: i32,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseItem {
    pub id: DbId,
    pub name: String,
    pub quantity: i32,
    pub location: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimateItem {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub quantity: i32,
    pub unit_price_cents: Cents,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationItem {
    pub id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub quantity: i32,
    pub unit_price_cents: Cents,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePermission {
    pub id: DbId,
    pub employee_id: DbId,
    pub permission: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tool {
    pub id: DbId,
    pub name: String,
    pub serial_number: Option<String>,
    pub qr_code: Option<String>,
    pub created_at: Timestamp,
}

/// One edge of the Employee↔Tool assignment set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolAssignment {
    pub id: DbId,
    pub tool_id: DbId,
    pub employee_id: DbId,
    pub created_at: Timestamp,
}

/// An inspection record for a tool. Never deleted on its own; it goes
/// away with its tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Protocol {
    pub id: DbId,
    pub tool_id: DbId,
    pub number: String,
    pub inspected_at: Timestamp,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// Any row the entity store can hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Client(Client),
    Supplier(Supplier),
    Project(Project),
    Order(Order),
    Task(Task),
    Expense(Expense),
    Resource(Resource),
    WarehouseItem(WarehouseItem),
    CostEstimateItem(CostEstimateItem),
    QuotationItem(QuotationItem),
    Employee(Employee),
    EmployeePermission(EmployeePermission),
    Tool(Tool),
    ToolAssignment(ToolAssignment),
    Protocol(Protocol),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Client(_) => RecordKind::Client,
            Record::Supplier(_) => RecordKind::Supplier,
            Record::Project(_) => RecordKind::Project,
            Record::Order(_) => RecordKind::Order,
            Record::Task(_) => RecordKind::Task,
            Record::Expense(_) => RecordKind::Expense,
            Record::Resource(_) => RecordKind::Resource,
            Record::WarehouseItem(_) => RecordKind::WarehouseItem,
            Record::CostEstimateItem(_) => RecordKind::CostEstimateItem,
            Record::QuotationItem(_) => RecordKind::QuotationItem,
            Record::Employee(_) => RecordKind::Employee,
            Record::EmployeePermission(_) => RecordKind::EmployeePermission,
            Record::Tool(_) => RecordKind::Tool,
            Record::ToolAssignment(_) => RecordKind::ToolAssignment,
            Record::Protocol(_) => RecordKind::Protocol,
        }
    }

    pub fn id(&self) -> DbId {
        match self {
            Record::Client(r) => r.id,
            Record::Supplier(r) => r.id,
            Record::Project(r) => r.id,
            Record::Order(r) => r.id,
            Record::Task(r) => r.id,
            Record::Expense(r) => r.id,
            Record::Resource(r) => r.id,
            Record::WarehouseItem(r) => r.id,
            Record::CostEstimateItem(r) => r.id,
            Record::QuotationItem(r) => r.id,
            Record::Employee(r) => r.id,
            Record::EmployeePermission(r) => r.id,
            Record::Tool(r) => r.id,
            Record::ToolAssignment(r) => r.id,
            Record::Protocol(r) => r.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: DbId) {
        match self {
            Record::Client(r) => r.id = id,
            Record::Supplier(r) => r.id = id,
            Record::Project(r) => r.id = id,
            Record::Order(r) => r.id = id,
            Record::Task(r) => r.id = id,
            Record::Expense(r) => r.id = id,
            Record::Resource(r) => r.id = id,
            Record::WarehouseItem(r) => r.id = id,
            Record::CostEstimateItem(r) => r.id = id,
            Record::QuotationItem(r) => r.id = id,
            Record::Employee(r) => r.id = id,
            Record::EmployeePermission(r) => r.id = id,
            Record::Tool(r) => r.id = id,
            Record::ToolAssignment(r) => r.id = id,
            Record::Protocol(r) => r.id = id,
        }
    }

    /// Lifecycle state, or `None` for kinds without a trash concept.
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        match self {
            Record::Client(r) => Some(r.lifecycle),
            Record::Supplier(r) => Some(r.lifecycle),
            Record::Project(r) => Some(r.lifecycle),
            Record::Order(r) => Some(r.lifecycle),
            Record::Task(r) => Some(r.lifecycle),
            Record::Expense(r) => Some(r.lifecycle),
            Record::Resource(r) => Some(r.lifecycle),
            Record::WarehouseItem(r) => Some(r.lifecycle),
            _ => None,
        }
    }

    /// Overwrite the lifecycle state. Returns `false` for kinds that have none.
    pub fn set_lifecycle(&mut self, lifecycle: Lifecycle) -> bool {
        let slot = match self {
            Record::Client(r) => &mut r.lifecycle,
            Record::Supplier(r) => &mut r.lifecycle,
            Record::Project(r) => &mut r.lifecycle,
            Record::Order(r) => &mut r.lifecycle,
            Record::Task(r) => &mut r.lifecycle,
            Record::Expense(r) => &mut r.lifecycle,
            Record::Resource(r) => &mut r.lifecycle,
            Record::WarehouseItem(r) => &mut r.lifecycle,
            _ => return false,
        };
        *slot = lifecycle;
        true
    }

    /// The id this record points at in `parent`'s table, if it has such a
    /// reference and it is set.
    pub fn reference(&self, parent: RecordKind) -> Option<DbId> {
        match (self, parent) {
            (Record::Project(r), RecordKind::Client) => Some(r.client_id),
            (Record::Order(r), RecordKind::Project) => Some(r.project_id),
            (Record::Order(r), RecordKind::Supplier) => r.supplier_id,
            (Record::Order(r), RecordKind::Task) => r.task_id,
            (Record::Task(r), RecordKind::Project) => Some(r.project_id),
            (Record::Expense(r), RecordKind::Project) => Some(r.project_id),
            (Record::Resource(r), RecordKind::Project) => Some(r.project_id),
            (Record::CostEstimateItem(r), RecordKind::Project) => Some(r.project_id),
            (Record::QuotationItem(r), RecordKind::Project) => Some(r.project_id),
            (Record::EmployeePermission(r), RecordKind::Employee) => Some(r.employee_id),
            (Record::ToolAssignment(r), RecordKind::Tool) => Some(r.tool_id),
            (Record::ToolAssignment(r), RecordKind::Employee) => Some(r.employee_id),
            (Record::Protocol(r), RecordKind::Tool) => Some(r.tool_id),
            _ => None,
        }
    }

    /// Null out a nullable reference. Returns `true` if one was cleared.
    pub fn clear_reference(&mut self, parent: RecordKind) -> bool {
        let slot = match (self, parent) {
            (Record::Order(r), RecordKind::Supplier) => &mut r.supplier_id,
            (Record::Order(r), RecordKind::Task) => &mut r.task_id,
            _ => return false,
        };
        slot.take().is_some()
    }

    /// Human-readable name shown in trash listings.
    pub fn label(&self) -> Option<&str> {
        match self {
            Record::Client(r) => Some(&r.name),
            Record::Supplier(r) => Some(&r.name),
            Record::Project(r) => Some(&r.name),
            Record::Order(r) => Some(&r.title),
            Record::Task(r) => Some(&r.title),
            Record::Expense(r) => Some(&r.description),
            Record::Resource(r) => Some(&r.name),
            Record::WarehouseItem(r) => Some(&r.name),
            Record::CostEstimateItem(r) => Some(&r.description),
            Record::QuotationItem(r) => Some(&r.description),
            Record::Employee(r) => Some(&r.name),
            Record::EmployeePermission(r) => Some(&r.permission),
            Record::Tool(r) => Some(&r.name),
            Record::ToolAssignment(_) => None,
            Record::Protocol(r) => Some(&r.number),
        }
    }
}

/// Records that move through the trash.
pub trait SoftDeletable: Sized {
    const KIND: EntityKind;

    fn id(&self) -> DbId;

    fn lifecycle(&self) -> Lifecycle;

    /// Unwrap the typed record, or `None` if `record` is another kind.
    fn from_record(record: Record) -> Option<Self>;
}

/// Records whose delete is immediate and final.
pub trait HardDeleteOnly: Sized {
    const KIND: RecordKind;
}

macro_rules! record_variant {
    ($ty:ident) => {
        impl From<$ty> for Record {
            fn from(record: $ty) -> Self {
                Record::$ty(record)
            }
        }
    };
}

macro_rules! soft_deletable {
    ($($ty:ident),* $(,)?) => {$(
        record_variant!($ty);

        impl SoftDeletable for $ty {
            const KIND: EntityKind = EntityKind::$ty;

            fn id(&self) -> DbId {
                self.id
            }

            fn lifecycle(&self) -> Lifecycle {
                self.lifecycle
            }

            fn from_record(record: Record) -> Option<Self> {
                match record {
                    Record::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! hard_delete_only {
    ($($ty:ident),* $(,)?) => {$(
        record_variant!($ty);

        impl HardDeleteOnly for $ty {
            const KIND: RecordKind = RecordKind::$ty;
        }
    )*};
}

soft_deletable!(Client, Supplier, Project, Order, Task, Expense, Resource, WarehouseItem);
hard_delete_only!(CostEstimateItem, QuotationItem, EmployeePermission, Employee, Tool);
record_variant!(ToolAssignment);
record_variant!(Protocol);
