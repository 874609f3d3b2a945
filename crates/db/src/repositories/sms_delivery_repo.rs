//! Repository for the `sms_delivery_log` table.

use sqlx::PgPool;
use wristbud_core::types::DbId;
use wristbud_core::AttemptStatus;

use crate::models::alert::SmsDeliveryAttempt;

/// Column list for `sms_delivery_log` queries.
const COLUMNS: &str =
    "id, alert_id, contact_name, phone_number, status, failure_reason, attempted_at";

/// Records the outcome of every individual transport attempt.
pub struct SmsDeliveryRepo;

impl SmsDeliveryRepo {
    /// Record one attempt outcome, returning the generated ID.
    ///
    /// `contact_name`/`phone_number` are `None` for the single
    /// `no_recipient` row written when a subject has no enabled contact.
    pub async fn record(
        pool: &PgPool,
        alert_id: DbId,
        contact_name: Option<&str>,
        phone_number: Option<&str>,
        status: AttemptStatus,
        failure_reason: Option<&str>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO sms_delivery_log \
                (alert_id, contact_name, phone_number, status, failure_reason) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(alert_id)
        .bind(contact_name)
        .bind(phone_number)
        .bind(status.as_str())
        .bind(failure_reason)
        .fetch_one(pool)
        .await
    }

    /// All attempts recorded against one alert, in attempt order.
    pub async fn list_for_alert(
        pool: &PgPool,
        alert_id: DbId,
    ) -> Result<Vec<SmsDeliveryAttempt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sms_delivery_log \
             WHERE alert_id = $1 \
             ORDER BY attempted_at, id"
        );
        sqlx::query_as::<_, SmsDeliveryAttempt>(&query)
            .bind(alert_id)
            .fetch_all(pool)
            .await
    }
}
