//! Vitals sample payload and unit helpers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Optional geolocation attached to a sample or alert.
///
/// Fields are independently optional; an address may exist without
/// coordinates (phone geocoders often return only one or the other).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none() && self.address.is_none()
    }
}

/// A vitals payload as handed over by the ingestion boundary.
///
/// Every vital is optional (wearables report whatever sensors they have),
/// but a reading with no numeric vital at all is invalid and rejected at
/// ingestion. Temperature is always Celsius; Fahrenheit inputs must be
/// normalized with [`fahrenheit_to_celsius`] before construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    pub heart_rate_bpm: Option<f64>,
    pub systolic_mm_hg: Option<f64>,
    pub diastolic_mm_hg: Option<f64>,
    pub spo2_percent: Option<f64>,
    pub temperature_c: Option<f64>,

    /// Free-text activity hint (e.g. "resting", "running"); passed through.
    pub activity_tag: Option<String>,
    /// Free-text context hint; passed through.
    pub context_tag: Option<String>,

    #[serde(default)]
    pub location: Location,

    /// When the device recorded the sample. `None` means the store assigns
    /// the ingestion time.
    pub recorded_at: Option<Timestamp>,
}

impl VitalsReading {
    /// Whether at least one numeric vital is present.
    ///
    /// A reading with none is rejected with a validation error and never
    /// persisted.
    pub fn has_numeric_field(&self) -> bool {
        self.heart_rate_bpm.is_some()
            || self.systolic_mm_hg.is_some()
            || self.diastolic_mm_hg.is_some()
            || self.spo2_percent.is_some()
            || self.temperature_c.is_some()
    }

    /// Reject readings that carry no numeric vital.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.has_numeric_field() {
            return Err(CoreError::Validation(
                "at least one numeric vital is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert a Fahrenheit temperature to canonical Celsius.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}
