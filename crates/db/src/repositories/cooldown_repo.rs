//! Repository for the `alert_cooldowns` dedup mapping.

use chrono::Duration;
use sqlx::PgPool;
use wristbud_core::types::{DbId, Timestamp};

use crate::models::cooldown::AlertCooldown;

/// Column list for `alert_cooldowns` queries.
const COLUMNS: &str = "id, subject_id, alert_kind, last_notified_at";

/// Durable last-notified state per (subject, alert kind) pair.
pub struct CooldownRepo;

impl CooldownRepo {
    /// Atomically claim the right to notify for a dedup key.
    ///
    /// Single upsert: inserts the key when absent, refreshes
    /// `last_notified_at` only when the existing stamp is older than the
    /// cooldown window. The unique index on (subject_id, alert_kind)
    /// serializes concurrent claims per key: two near-simultaneous claims
    /// inside the window cannot both succeed, and unrelated keys never
    /// contend. Returns `true` when the claim won.
    pub async fn try_claim(
        pool: &PgPool,
        subject_id: DbId,
        alert_kind: &str,
        now: Timestamp,
        window: Duration,
    ) -> Result<bool, sqlx::Error> {
        let cutoff = now - window;
        let claimed: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO alert_cooldowns (subject_id, alert_kind, last_notified_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (subject_id, alert_kind) \
             DO UPDATE SET last_notified_at = EXCLUDED.last_notified_at \
             WHERE alert_cooldowns.last_notified_at <= $4 \
             RETURNING id",
        )
        .bind(subject_id)
        .bind(alert_kind)
        .bind(now)
        .bind(cutoff)
        .fetch_optional(pool)
        .await?;
        Ok(claimed.is_some())
    }

    /// Read-only check: would a notification be allowed right now?
    pub async fn should_notify(
        pool: &PgPool,
        subject_id: DbId,
        alert_kind: &str,
        now: Timestamp,
        window: Duration,
    ) -> Result<bool, sqlx::Error> {
        let last: Option<Timestamp> = sqlx::query_scalar(
            "SELECT last_notified_at FROM alert_cooldowns \
             WHERE subject_id = $1 AND alert_kind = $2",
        )
        .bind(subject_id)
        .bind(alert_kind)
        .fetch_optional(pool)
        .await?;
        Ok(match last {
            Some(last) => last <= now - window,
            None => true,
        })
    }

    /// Unconditionally record a dispatched notification.
    pub async fn record_notified(
        pool: &PgPool,
        subject_id: DbId,
        alert_kind: &str,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO alert_cooldowns (subject_id, alert_kind, last_notified_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (subject_id, alert_kind) \
             DO UPDATE SET last_notified_at = EXCLUDED.last_notified_at",
        )
        .bind(subject_id)
        .bind(alert_kind)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch the current cooldown state for a key, if any.
    pub async fn get(
        pool: &PgPool,
        subject_id: DbId,
        alert_kind: &str,
    ) -> Result<Option<AlertCooldown>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alert_cooldowns \
             WHERE subject_id = $1 AND alert_kind = $2"
        );
        sqlx::query_as::<_, AlertCooldown>(&query)
            .bind(subject_id)
            .bind(alert_kind)
            .fetch_optional(pool)
            .await
    }
}
