//! Supplier row and DTOs.

use bizdesk_core::lifecycle::record::Supplier;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `suppliers` table.
#[derive(Debug, Clone, FromRow)]
pub struct SupplierRow {
    pub id: DbId,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for SupplierRow {
    type Model = Supplier;

    const KIND: RecordKind = RecordKind::Supplier;
    const COLUMNS: &'static str =
        "id, name, contact_person, email, phone, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Supplier, InvalidLifecycle> {
        Ok(Supplier {
            id: self.id,
            name: self.name,
            contact_person: self.contact_person,
            email: self.email,
            phone: self.phone,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new supplier.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSupplier {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// DTO for updating a supplier. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
