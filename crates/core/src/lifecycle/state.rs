//! Deletion state of soft-deletable records.
//!
//! Storage keeps two columns, `is_deleted` (0/1) and `deleted_at`. In memory
//! they are folded into [`Lifecycle`] so a deleted record without a
//! timestamp, or an active one with a timestamp, cannot be constructed.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// The `is_deleted` column. Some consumers read it as a number, so it
/// serializes as `0` / `1` rather than a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum DeletionFlag {
    Active = 0,
    Deleted = 1,
}

impl DeletionFlag {
    pub const fn as_i16(self) -> i16 {
        self as i16
    }
}

impl From<DeletionFlag> for i16 {
    fn from(flag: DeletionFlag) -> Self {
        flag.as_i16()
    }
}

impl TryFrom<i16> for DeletionFlag {
    type Error = InvalidLifecycle;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DeletionFlag::Active),
            1 => Ok(DeletionFlag::Deleted),
            other => Err(InvalidLifecycle::Flag(other)),
        }
    }
}

/// Column values that do not describe a valid lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLifecycle {
    #[error("is_deleted must be 0 or 1, got {0}")]
    Flag(i16),

    #[error("is_deleted = {is_deleted} disagrees with deleted_at (present: {has_timestamp})")]
    Inconsistent { is_deleted: i16, has_timestamp: bool },
}

/// Lifecycle state carried by every soft-deletable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "LifecycleColumns", try_from = "LifecycleColumns")]
pub enum Lifecycle {
    Active,
    Deleted { at: Timestamp },
}

impl Lifecycle {
    pub fn deleted(at: Timestamp) -> Self {
        Lifecycle::Deleted { at }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Lifecycle::Deleted { .. })
    }

    pub fn flag(&self) -> DeletionFlag {
        match self {
            Lifecycle::Active => DeletionFlag::Active,
            Lifecycle::Deleted { .. } => DeletionFlag::Deleted,
        }
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }

    /// Rebuild the state from its two storage columns.
    pub fn from_columns(
        is_deleted: i16,
        deleted_at: Option<Timestamp>,
    ) -> Result<Self, InvalidLifecycle> {
        match (DeletionFlag::try_from(is_deleted)?, deleted_at) {
            (DeletionFlag::Active, None) => Ok(Lifecycle::Active),
            (DeletionFlag::Deleted, Some(at)) => Ok(Lifecycle::Deleted { at }),
            (_, deleted_at) => Err(InvalidLifecycle::Inconsistent {
                is_deleted,
                has_timestamp: deleted_at.is_some(),
            }),
        }
    }
}

/// Wire shape of [`Lifecycle`]: the two storage columns side by side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LifecycleColumns {
    pub is_deleted: DeletionFlag,
    pub deleted_at: Option<Timestamp>,
}

impl From<Lifecycle> for LifecycleColumns {
    fn from(lifecycle: Lifecycle) -> Self {
        LifecycleColumns {
            is_deleted: lifecycle.flag(),
            deleted_at: lifecycle.deleted_at(),
        }
    }
}

impl TryFrom<LifecycleColumns> for Lifecycle {
    type Error = InvalidLifecycle;

    fn try_from(columns: LifecycleColumns) -> Result<Self, Self::Error> {
        Lifecycle::from_columns(columns.is_deleted.as_i16(), columns.deleted_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn flag_and_timestamp_agree() {
        let now = Utc::now();
        let deleted = Lifecycle::deleted(now);
        assert_eq!(deleted.flag(), DeletionFlag::Deleted);
        assert_eq!(deleted.deleted_at(), Some(now));

        assert_eq!(Lifecycle::Active.flag(), DeletionFlag::Active);
        assert_eq!(Lifecycle::Active.deleted_at(), None);
    }

    #[test]
    fn from_columns_rejects_inconsistent_pairs() {
        let now = Utc::now();
        assert_eq!(
            Lifecycle::from_columns(1, None),
            Err(InvalidLifecycle::Inconsistent {
                is_deleted: 1,
                has_timestamp: false
            })
        );
        assert_eq!(
            Lifecycle::from_columns(0, Some(now)),
            Err(InvalidLifecycle::Inconsistent {
                is_deleted: 0,
                has_timestamp: true
            })
        );
        assert_eq!(
            Lifecycle::from_columns(2, None),
            Err(InvalidLifecycle::Flag(2))
        );
        assert_eq!(Lifecycle::from_columns(1, Some(now)), Ok(Lifecycle::deleted(now)));
    }

    #[test]
    fn serializes_as_numeric_flag() {
        let json = serde_json::to_value(Lifecycle::Active).unwrap();
        assert_eq!(json["is_deleted"], 0);
        assert!(json["deleted_at"].is_null());

        let json = serde_json::to_value(Lifecycle::deleted(Utc::now())).unwrap();
        assert_eq!(json["is_deleted"], 1);
        assert!(json["deleted_at"].is_string());
    }
}
