//! Dedup cooldown state entity model.

use serde::Serialize;
use sqlx::FromRow;
use wristbud_core::types::{DbId, Timestamp};

/// A row from the `alert_cooldowns` table: the last time a notification
/// was dispatched for a (subject, alert kind) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlertCooldown {
    pub id: DbId,
    pub subject_id: DbId,
    pub alert_kind: String,
    pub last_notified_at: Timestamp,
}
