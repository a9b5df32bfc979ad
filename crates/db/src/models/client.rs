//! Client row and DTOs.

use bizdesk_core::lifecycle::record::Client;
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{LifecycleRow, StoredRow};

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[sqlx(flatten)]
    pub lifecycle: LifecycleRow,
    pub created_at: Timestamp,
}

impl StoredRow for ClientRow {
    type Model = Client;

    const KIND: RecordKind = RecordKind::Client;
    const COLUMNS: &'static str =
        "id, name, email, phone, address, is_deleted, deleted_at, created_at";

    fn into_model(self) -> Result<Client, InvalidLifecycle> {
        Ok(Client {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            lifecycle: self.lifecycle.into_lifecycle()?,
            created_at: self.created_at,
        })
    }
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// DTO for updating a client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
