//! Repository for the `emergency_contacts` lookup.
//!
//! Contact management itself belongs to the profile service; the alerting
//! core only reads the ordered contact list for a subject.

use sqlx::PgPool;
use wristbud_core::types::DbId;

use crate::models::contact::EmergencyContactRow;

/// Column list for `emergency_contacts` queries.
const COLUMNS: &str =
    "id, owner_subject_id, name, phone, relationship, sms_alerts_enabled, created_at";

/// Read-side access to a subject's emergency contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Ordered contact list for a subject (insertion order).
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<Vec<EmergencyContactRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM emergency_contacts \
             WHERE owner_subject_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, EmergencyContactRow>(&query)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }

    /// Display name from the `subjects` projection, if known.
    pub async fn subject_name(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM subjects WHERE id = $1")
            .bind(subject_id)
            .fetch_optional(pool)
            .await
    }
}
