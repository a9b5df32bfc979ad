//! Tool, tool assignment and inspection protocol rows and DTOs.

use bizdesk_core::lifecycle::record::{Protocol, Tool, ToolAssignment};
use bizdesk_core::lifecycle::{InvalidLifecycle, RecordKind};
use bizdesk_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::StoredRow;

/// A row from the `tools` table.
#[derive(Debug, Clone, FromRow)]
pub struct ToolRow {
    pub id: DbId,
    pub name: String,
    pub serial_number: Option<String>,
    pub qr_code: Option<String>,
    pub created_at: Timestamp,
}

impl StoredRow for ToolRow {
    type Model = Tool;

    const KIND: RecordKind = RecordKind::Tool;
    const COLUMNS: &'static str = "id, name, serial_number, qr_code, created_at";

    fn into_model(self) -> Result<Tool, InvalidLifecycle> {
        Ok(Tool {
            id: self.id,
            name: self.name,
            serial_number: self.serial_number,
            qr_code: self.qr_code,
            created_at: self.created_at,
        })
    }
}

/// A row from the `tool_assignments` table.
#[derive(Debug, Clone, FromRow)]
pub struct ToolAssignmentRow {
    pub id: DbId,
    pub tool_id: DbId,
    pub employee_id: DbId,
    pub created_at: Timestamp,
}

impl StoredRow for ToolAssignmentRow {
    type Model = ToolAssignment;

    const KIND: RecordKind = RecordKind::ToolAssignment;
    const COLUMNS: &'static str = "id, tool_id, employee_id, created_at";

    fn into_model(self) -> Result<ToolAssignment, InvalidLifecycle> {
        Ok(ToolAssignment {
            id: self.id,
            tool_id: self.tool_id,
            employee_id: self.employee_id,
            created_at: self.created_at,
        })
    }
}

/// A row from the `protocols` table. `seq` stays in the database; the
/// record only carries the formatted number.
#[derive(Debug, Clone, FromRow)]
pub struct ProtocolRow {
    pub id: DbId,
    pub tool_id: DbId,
    pub number: String,
    pub inspected_at: Timestamp,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl StoredRow for ProtocolRow {
    type Model = Protocol;

    const KIND: RecordKind = RecordKind::Protocol;
    const COLUMNS: &'static str = "id, tool_id, number, inspected_at, notes, created_at";

    fn into_model(self) -> Result<Protocol, InvalidLifecycle> {
        Ok(Protocol {
            id: self.id,
            tool_id: self.tool_id,
            number: self.number,
            inspected_at: self.inspected_at,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// DTO for registering a new tool.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTool {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub qr_code: Option<String>,
}

/// DTO for updating a tool. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTool {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub qr_code: Option<String>,
}

/// DTO for recording an inspection. The protocol number is assigned.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProtocol {
    pub tool_id: DbId,
    pub inspected_at: Timestamp,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
