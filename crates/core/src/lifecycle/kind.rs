//! Closed enumerations of the record kinds known to the lifecycle engine.
//!
//! [`EntityKind`] covers the soft-deletable kinds (the ones with a trash
//! concept). [`RecordKind`] covers every table the entity store holds,
//! including the hard-delete-only kinds and link rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a kind name does not match any known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity type: {0}")]
pub struct UnknownKind(pub String);

/// Soft-deletable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "clients")]
    Client,
    #[serde(rename = "suppliers")]
    Supplier,
    #[serde(rename = "projects")]
    Project,
    #[serde(rename = "orders")]
    Order,
    #[serde(rename = "tasks")]
    Task,
    #[serde(rename = "expenses")]
    Expense,
    #[serde(rename = "resources")]
    Resource,
    #[serde(rename = "warehouse_items")]
    WarehouseItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Client,
        EntityKind::Supplier,
        EntityKind::Project,
        EntityKind::Order,
        EntityKind::Task,
        EntityKind::Expense,
        EntityKind::Resource,
        EntityKind::WarehouseItem,
    ];

    /// Table name, also used as the URL segment.
    pub const fn table(self) -> &'static str {
        self.record_kind().table()
    }

    pub const fn record_kind(self) -> RecordKind {
        match self {
            EntityKind::Client => RecordKind::Client,
            EntityKind::Supplier => RecordKind::Supplier,
            EntityKind::Project => RecordKind::Project,
            EntityKind::Order => RecordKind::Order,
            EntityKind::Task => RecordKind::Task,
            EntityKind::Expense => RecordKind::Expense,
            EntityKind::Resource => RecordKind::Resource,
            EntityKind::WarehouseItem => RecordKind::WarehouseItem,
        }
    }
}

impl From<EntityKind> for RecordKind {
    fn from(kind: EntityKind) -> Self {
        kind.record_kind()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Every kind of row held by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "clients")]
    Client,
    #[serde(rename = "suppliers")]
    Supplier,
    #[serde(rename = "projects")]
    Project,
    #[serde(rename = "orders")]
    Order,
    #[serde(rename = "tasks")]
    Task,
    #[serde(rename = "expenses")]
    Expense,
    #[serde(rename = "resources")]
    Resource,
    #[serde(rename = "warehouse_items")]
    WarehouseItem,
    #[serde(rename = "cost_estimate_items")]
    CostEstimateItem,
    #[serde(rename = "quotation_items")]
    QuotationItem,
    #[serde(rename = "employees")]
    Employee,
    #[serde(rename = "employee_permissions")]
    EmployeePermission,
    #[serde(rename = "tools")]
    Tool,
    #[serde(rename = "tool_assignments")]
    ToolAssignment,
    #[serde(rename = "protocols")]
    Protocol,
}

impl RecordKind {
    pub const ALL: [RecordKind; 15] = [
        RecordKind::Client,
        RecordKind::Supplier,
        RecordKind::Project,
        RecordKind::Order,
        RecordKind::Task,
        RecordKind::Expense,
        RecordKind::Resource,
        RecordKind::WarehouseItem,
        RecordKind::CostEstimateItem,
        RecordKind::QuotationItem,
        RecordKind::Employee,
        RecordKind::EmployeePermission,
        RecordKind::Tool,
        RecordKind::ToolAssignment,
        RecordKind::Protocol,
    ];

    pub const fn table(self) -> &'static str {
        match self {
            RecordKind::Client => "clients",
            RecordKind::Supplier => "suppliers",
            RecordKind::Project => "projects",
            RecordKind::Order => "orders",
            RecordKind::Task => "tasks",
            RecordKind::Expense => "expenses",
            RecordKind::Resource => "resources",
            RecordKind::WarehouseItem => "warehouse_items",
            RecordKind::CostEstimateItem => "cost_estimate_items",
            RecordKind::QuotationItem => "quotation_items",
            RecordKind::Employee => "employees",
            RecordKind::EmployeePermission => "employee_permissions",
            RecordKind::Tool => "tools",
            RecordKind::ToolAssignment => "tool_assignments",
            RecordKind::Protocol => "protocols",
        }
    }

    /// Singular display name, e.g. `"Client"`.
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Client => "Client",
            RecordKind::Supplier => "Supplier",
            RecordKind::Project => "Project",
            RecordKind::Order => "Order",
            RecordKind::Task => "Task",
            RecordKind::Expense => "Expense",
            RecordKind::Resource => "Resource",
            RecordKind::WarehouseItem => "WarehouseItem",
            RecordKind::CostEstimateItem => "CostEstimateItem",
            RecordKind::QuotationItem => "QuotationItem",
            RecordKind::Employee => "Employee",
            RecordKind::EmployeePermission => "EmployeePermission",
            RecordKind::Tool => "Tool",
            RecordKind::ToolAssignment => "ToolAssignment",
            RecordKind::Protocol => "Protocol",
        }
    }

    /// The soft-deletable kind this maps to, if it has a trash concept.
    pub const fn entity_kind(self) -> Option<EntityKind> {
        match self {
            RecordKind::Client => Some(EntityKind::Client),
            RecordKind::Supplier => Some(EntityKind::Supplier),
            RecordKind::Project => Some(EntityKind::Project),
            RecordKind::Order => Some(EntityKind::Order),
            RecordKind::Task => Some(EntityKind::Task),
            RecordKind::Expense => Some(EntityKind::Expense),
            RecordKind::Resource => Some(EntityKind::Resource),
            RecordKind::WarehouseItem => Some(EntityKind::WarehouseItem),
            _ => None,
        }
    }

    /// Whether rows of this kind carry `is_deleted` / `deleted_at`.
    pub const fn has_lifecycle(self) -> bool {
        self.entity_kind().is_some()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
