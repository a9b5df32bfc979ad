//! Repository for tool inspection protocols.

use bizdesk_core::lifecycle::record::Protocol;
use bizdesk_core::numbering::{next_sequence, protocol_number};
use bizdesk_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::RepoResult;
use crate::models::tool::{CreateProtocol, ProtocolRow};
use crate::models::{decode, decode_all, StoredRow};

const COLUMNS: &str = ProtocolRow::COLUMNS;

/// Creates and lists inspection protocols.
pub struct ProtocolRepo;

impl ProtocolRepo {
    /// Record an inspection and assign the tool's next protocol number.
    ///
    /// The tool row is locked while the sequence is read, so two concurrent
    /// inspections of one tool get consecutive numbers. Returns `None` if the
    /// tool does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProtocol,
    ) -> RepoResult<Option<Protocol>> {
        input.validate()?;

        let mut tx = pool.begin().await?;

        let tool: Option<(DbId,)> = sqlx::query_as("SELECT id FROM tools WHERE id = $1 FOR UPDATE")
            .bind(input.tool_id)
            .fetch_optional(&mut *tx)
            .await?;
        if tool.is_none() {
            return Ok(None);
        }

        let (last,): (Option<i32>,) =
            sqlx::query_as("SELECT MAX(seq) FROM protocols WHERE tool_id = $1")
                .bind(input.tool_id)
                .fetch_one(&mut *tx)
                .await?;
        let seq = next_sequence(last)?;
        let number = protocol_number(input.tool_id, seq)?;

        let query = format!(
            "INSERT INTO protocols (tool_id, seq, number, inspected_at, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProtocolRow>(&query)
            .bind(input.tool_id)
            .bind(seq)
            .bind(&number)
            .bind(input.inspected_at)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(decode(row)?))
    }

    /// A tool's protocols, in inspection-number order.
    pub async fn list_by_tool(pool: &PgPool, tool_id: DbId) -> Result<Vec<Protocol>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM protocols WHERE tool_id = $1 ORDER BY seq");
        let rows = sqlx::query_as::<_, ProtocolRow>(&query)
            .bind(tool_id)
            .fetch_all(pool)
            .await?;
        decode_all(rows)
    }
}
