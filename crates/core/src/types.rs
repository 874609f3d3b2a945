//! Shared primitive type aliases.

/// Database identifier (bigserial primary key).
pub type DbId = i64;

/// UTC timestamp used across all persisted records.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
