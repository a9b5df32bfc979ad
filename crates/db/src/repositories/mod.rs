//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async create, read and
//! update methods that accept `&PgPool` as the first argument. Reads exclude
//! soft-deleted rows unless the method name says otherwise. Deletion is not
//! here: it goes through the lifecycle engine and [`PgEntityStore`].
//!
//! [`PgEntityStore`]: crate::store::PgEntityStore

pub mod client_repo;
pub mod employee_repo;
pub mod estimate_repo;
pub mod expense_repo;
pub mod order_repo;
pub mod project_repo;
pub mod protocol_repo;
pub mod resource_repo;
pub mod supplier_repo;
pub mod task_repo;
pub mod tool_repo;
pub mod warehouse_item_repo;

pub use client_repo::ClientRepo;
pub use employee_repo::EmployeeRepo;
pub use estimate_repo::{CostEstimateRepo, QuotationRepo};
pub use expense_repo::ExpenseRepo;
pub use order_repo::OrderRepo;
pub use project_repo::ProjectRepo;
pub use protocol_repo::ProtocolRepo;
pub use resource_repo::ResourceRepo;
pub use supplier_repo::SupplierRepo;
pub use task_repo::TaskRepo;
pub use tool_repo::ToolRepo;
pub use warehouse_item_repo::WarehouseItemRepo;
