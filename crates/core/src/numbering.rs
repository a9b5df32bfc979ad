//! Human-readable numbers for tool inspection protocols.
//!
//! Protocols are numbered per tool: the third inspection of tool 12 is
//! `P-12-003`. The sequence is kept in its own column; the number is derived
//! from it and never parsed back for ordering.

use crate::error::CoreError;
use crate::types::DbId;

/// Largest sequence a protocol number can carry.
pub const MAX_SEQUENCE: i32 = 999_999;

/// Format the protocol number for the `seq`-th inspection of `tool_id`.
pub fn protocol_number(tool_id: DbId, seq: i32) -> Result<String, CoreError> {
    if seq < 1 || seq > MAX_SEQUENCE {
        return Err(CoreError::Validation(format!(
            "protocol sequence must be between 1 and {MAX_SEQUENCE}, got {seq}"
        )));
    }
    Ok(format!("P-{tool_id}-{seq:03}"))
}

/// Sequence following `last` (the highest sequence already used for a tool).
pub fn next_sequence(last: Option<i32>) -> Result<i32, CoreError> {
    match last {
        None => Ok(1),
        Some(seq) => seq.checked_add(1).ok_or_else(|| {
            CoreError::Validation(format!("protocol sequence {seq} cannot be incremented"))
        }),
    }
}
