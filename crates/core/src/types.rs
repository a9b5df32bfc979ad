/// Primary keys are PostgreSQL `BIGSERIAL`, unique per table.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are stored as integer cents.
pub type Cents = i64;
