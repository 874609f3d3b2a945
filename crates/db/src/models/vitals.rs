//! Vitals sample entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wristbud_core::types::{DbId, Timestamp};
use wristbud_core::vitals::Location;
use wristbud_core::{Severity, VitalsReading};

/// A row from the append-only `vitals_samples` table.
///
/// `severity` is the tier derived at ingestion time; decision-making
/// consumers re-derive it from the raw vitals instead of trusting it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalsSample {
    pub id: DbId,
    pub subject_id: DbId,
    pub heart_rate_bpm: Option<f64>,
    pub systolic_mm_hg: Option<f64>,
    pub diastolic_mm_hg: Option<f64>,
    pub spo2_percent: Option<f64>,
    pub temperature_c: Option<f64>,
    pub activity_tag: Option<String>,
    pub context_tag: Option<String>,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub location_address: Option<String>,
    pub severity: String,
    pub recorded_at: Timestamp,
}

impl VitalsSample {
    /// Reconstruct the domain reading for re-classification and message
    /// composition.
    pub fn reading(&self) -> VitalsReading {
        VitalsReading {
            heart_rate_bpm: self.heart_rate_bpm,
            systolic_mm_hg: self.systolic_mm_hg,
            diastolic_mm_hg: self.diastolic_mm_hg,
            spo2_percent: self.spo2_percent,
            temperature_c: self.temperature_c,
            activity_tag: self.activity_tag.clone(),
            context_tag: self.context_tag.clone(),
            location: Location {
                latitude: self.location_latitude,
                longitude: self.location_longitude,
                address: self.location_address.clone(),
            },
            recorded_at: Some(self.recorded_at),
        }
    }
}

/// DTO for inserting a classified sample.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVitalsSample {
    pub subject_id: DbId,
    pub reading: VitalsReading,
    pub severity: Severity,
}
