//! Repository for the `clients` table.

use bizdesk_core::lifecycle::record::Client;
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::client::{ClientRow, CreateClient, UpdateClient};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ClientRow::COLUMNS;

/// Provides create, read and update operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> RepoResult<Client> {
        input.validate()?;

        let query = format!(
            "INSERT INTO clients (name, email, phone, address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ClientRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .fetch_one(pool)
            .await?;
        Ok(decode(row)?)
    }

    /// Find a client by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND is_deleted = 0");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// Find a client by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }

    /// List active clients by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE is_deleted = 0 ORDER BY name, id");
        let rows = sqlx::query_as::<_, ClientRow>(&query).fetch_all(pool).await?;
        decode_all(rows)
    }

    /// Update an active client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no active client with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address)
             WHERE id = $1 AND is_deleted = 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .fetch_optional(pool)
            .await?
            .map(decode)
            .transpose()
    }
}
