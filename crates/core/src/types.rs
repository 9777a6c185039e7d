/// Log table primary keys are MySQL `BIGINT AUTO_INCREMENT`.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
