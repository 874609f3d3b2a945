//! Alert and delivery-log entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wristbud_core::types::{DbId, Timestamp};
use wristbud_core::vitals::Location;
use wristbud_core::{AlertKind, Severity};

/// A row from the `alerts` table.
///
/// Immutable once written except for `delivery_status`, whose transitions
/// are monotone (`pending` to exactly one terminal state).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub subject_id: DbId,
    pub alert_kind: String,
    pub severity: String,
    pub message: String,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub location_address: Option<String>,
    pub delivery_status: String,
    pub created_at: Timestamp,
}

/// DTO for creating an alert; status always starts `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub subject_id: DbId,
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

/// A row from the `sms_delivery_log` table: one transport attempt outcome.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SmsDeliveryAttempt {
    pub id: DbId,
    pub alert_id: DbId,
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub status: String,
    pub failure_reason: Option<String>,
    pub attempted_at: Timestamp,
}
