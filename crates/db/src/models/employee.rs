//! Employee and permission rows and DTOs.

use bizdesk_core::lifecycle::record::{Employee, EmployeePermission};
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::StoredRow;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub created_at: Timestamp,
}

impl StoredRow for EmployeeRow {
    type Model = Employee;

    const KIND: RecordKind = RecordKind::Employee;
    const COLUMNS: &'static str = "id, name, email, created_at";

    fn into_model(self) -> Result<Employee, InvalidLifecycle> {
        Ok(Employee {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        })
    }
}

/// A row from the `employee_permissions` table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeePermissionRow {
    pub id: DbId,
    pub employee_id: DbId,
    pub permission: String,
    pub created_at: Timestamp,
}

impl StoredRow for EmployeePermissionRow {
    type Model = EmployeePermission;

    const KIND: RecordKind = RecordKind::EmployeePermission;
    const COLUMNS: &'static str = "id, employee_id, permission, created_at";

    fn into_model(self) -> Result<EmployeePermission, InvalidLifecycle> {
        Ok(EmployeePermission {
            id: self.id,
            employee_id: self.employee_id,
            permission: self.permission,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
}

/// DTO for updating an employee. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// DTO for granting a permission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GrantPermission {
    #[validate(length(min = 1, max = 100))]
    pub permission: String,
}
