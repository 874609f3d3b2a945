//! Repository for the append-only `vitals_samples` table.

use sqlx::PgPool;
use wristbud_core::types::DbId;

use crate::models::vitals::{NewVitalsSample, VitalsSample};

/// Column list for `vitals_samples` queries.
const COLUMNS: &str = "id, subject_id, heart_rate_bpm, systolic_mm_hg, diastolic_mm_hg, \
     spo2_percent, temperature_c, activity_tag, context_tag, \
     location_latitude, location_longitude, location_address, severity, recorded_at";

/// Provides append and history-read operations for vitals samples.
///
/// The table is append-only: identical payloads appended twice produce two
/// distinct rows. Only alerts are deduplicated, never samples.
pub struct VitalsSampleRepo;

impl VitalsSampleRepo {
    /// Append a classified sample, returning the generated ID.
    ///
    /// When `reading.recorded_at` is `None` the server assigns `NOW()`.
    pub async fn insert(pool: &PgPool, sample: &NewVitalsSample) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO vitals_samples \
                (subject_id, heart_rate_bpm, systolic_mm_hg, diastolic_mm_hg, \
                 spo2_percent, temperature_c, activity_tag, context_tag, \
                 location_latitude, location_longitude, location_address, \
                 severity, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                     COALESCE($13, NOW())) \
             RETURNING id",
        )
        .bind(sample.subject_id)
        .bind(sample.reading.heart_rate_bpm)
        .bind(sample.reading.systolic_mm_hg)
        .bind(sample.reading.diastolic_mm_hg)
        .bind(sample.reading.spo2_percent)
        .bind(sample.reading.temperature_c)
        .bind(sample.reading.activity_tag.as_deref())
        .bind(sample.reading.context_tag.as_deref())
        .bind(sample.reading.location.latitude)
        .bind(sample.reading.location.longitude)
        .bind(sample.reading.location.address.as_deref())
        .bind(sample.severity.as_str())
        .bind(sample.reading.recorded_at)
        .fetch_one(pool)
        .await
    }

    /// The most recent sample for a subject by `recorded_at`.
    pub async fn latest(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<Option<VitalsSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vitals_samples \
             WHERE subject_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, VitalsSample>(&query)
            .bind(subject_id)
            .fetch_optional(pool)
            .await
    }

    /// Paginated history for a subject, most recent first.
    pub async fn history(
        pool: &PgPool,
        subject_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VitalsSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vitals_samples \
             WHERE subject_id = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, VitalsSample>(&query)
            .bind(subject_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Distinct subjects with at least one sample, i.e. the monitor loop's
    /// sweep work list.
    pub async fn list_subject_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT subject_id FROM vitals_samples ORDER BY subject_id")
            .fetch_all(pool)
            .await
    }
}
