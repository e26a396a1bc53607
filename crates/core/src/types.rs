/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All record timestamps are UTC.
pub type DateTime = chrono::DateTime<chrono::Utc>;
