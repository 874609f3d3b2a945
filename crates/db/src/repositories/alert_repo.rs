//! Repository for the `alerts` table.

use sqlx::PgPool;
use wristbud_core::types::DbId;
use wristbud_core::DeliveryStatus;

use crate::models::alert::{Alert, NewAlert};

/// Column list for `alerts` queries.
const COLUMNS: &str = "id, subject_id, alert_kind, severity, message, \
     location_latitude, location_longitude, location_address, \
     delivery_status, created_at";

/// Provides append and status-update operations for the alert log.
pub struct AlertRepo;

impl AlertRepo {
    /// Create an alert in `pending` state, returning the generated ID.
    pub async fn create(pool: &PgPool, alert: &NewAlert) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO alerts \
                (subject_id, alert_kind, severity, message, \
                 location_latitude, location_longitude, location_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(alert.subject_id)
        .bind(alert.kind.as_str())
        .bind(alert.severity.as_str())
        .bind(&alert.message)
        .bind(alert.location.latitude)
        .bind(alert.location.longitude)
        .bind(alert.location.address.as_deref())
        .fetch_one(pool)
        .await
    }

    /// Move a pending alert to a terminal delivery status.
    ///
    /// The update is guarded on `delivery_status = 'pending'` so terminal
    /// states never revert. Returns `true` if a row transitioned.
    pub async fn update_delivery_status(
        pool: &PgPool,
        alert_id: DbId,
        status: DeliveryStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE alerts \
             SET delivery_status = $2 \
             WHERE id = $1 AND delivery_status = 'pending'",
        )
        .bind(alert_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one alert by id.
    pub async fn get(pool: &PgPool, alert_id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .fetch_optional(pool)
            .await
    }

    /// List alerts for a subject, most recent first.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_id: DbId,
        limit: i64,
    ) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE subject_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(subject_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total alerts for a subject (dashboard boundary read).
    pub async fn count_for_subject(pool: &PgPool, subject_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM alerts WHERE subject_id = $1")
                .bind(subject_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
