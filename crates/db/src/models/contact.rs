//! Emergency contact entity model.

use serde::Serialize;
use sqlx::FromRow;
use wristbud_core::types::{DbId, Timestamp};
use wristbud_core::EmergencyContact;

/// A row from the `emergency_contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmergencyContactRow {
    pub id: DbId,
    pub owner_subject_id: DbId,
    pub name: String,
    pub phone: String,
    pub relationship: Option<String>,
    pub sms_alerts_enabled: bool,
    pub created_at: Timestamp,
}

impl From<EmergencyContactRow> for EmergencyContact {
    fn from(row: EmergencyContactRow) -> Self {
        EmergencyContact {
            owner_subject_id: row.owner_subject_id,
            name: row.name,
            phone: row.phone,
            relationship: row.relationship,
            sms_alerts_enabled: row.sms_alerts_enabled,
        }
    }
}
