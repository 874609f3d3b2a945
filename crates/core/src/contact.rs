//! Emergency contact read from the (external) profile store.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A caregiver contact for one monitored subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub owner_subject_id: DbId,
    pub name: String,
    pub phone: String,
    pub relationship: Option<String>,
    /// When false the notifier must skip dispatch for this contact.
    pub sms_alerts_enabled: bool,
}
