//! Clinical threshold classification of vitals samples.
//!
//! [`classify`] is the single canonical severity derivation for the whole
//! system. It is pure and side-effect free; every consumer (ingestion,
//! monitor loop, history readers) calls it rather than re-implementing
//! ranges. All temperature thresholds are Celsius.

use crate::severity::Severity;
use crate::vitals::VitalsReading;

// Critical bounds. Any single vital outside these forces CRITICAL.
pub const HR_CRITICAL_HIGH: f64 = 160.0;
pub const HR_CRITICAL_LOW: f64 = 40.0;
pub const SYSTOLIC_CRITICAL_HIGH: f64 = 180.0;
pub const DIASTOLIC_CRITICAL_HIGH: f64 = 110.0;
pub const SPO2_CRITICAL_LOW: f64 = 88.0;
pub const TEMP_CRITICAL_HIGH_C: f64 = 39.4;
pub const TEMP_CRITICAL_LOW_C: f64 = 34.4;

// Abnormal bounds, evaluated only when no critical bound is breached.
pub const HR_ABNORMAL_HIGH: f64 = 100.0;
pub const HR_ABNORMAL_LOW: f64 = 50.0;
pub const SYSTOLIC_ABNORMAL_HIGH: f64 = 140.0;
pub const DIASTOLIC_ABNORMAL_HIGH: f64 = 90.0;
pub const SPO2_ABNORMAL_LOW: f64 = 94.0;
pub const TEMP_ABNORMAL_HIGH_C: f64 = 37.8;
pub const TEMP_ABNORMAL_LOW_C: f64 = 35.5;

/// Map a vitals reading to its severity tier.
///
/// Critical predicates are evaluated first: one vital in a critical range
/// forces [`Severity::Critical`] even when every other vital is normal.
/// A reading with no numeric vital at all yields [`Severity::Error`].
pub fn classify(reading: &VitalsReading) -> Severity {
    if !reading.has_numeric_field() {
        return Severity::Error;
    }
    if is_critical(reading) {
        return Severity::Critical;
    }
    if is_abnormal(reading) {
        return Severity::Abnormal;
    }
    Severity::Normal
}

fn is_critical(reading: &VitalsReading) -> bool {
    let hr = reading
        .heart_rate_bpm
        .is_some_and(|v| v > HR_CRITICAL_HIGH || v < HR_CRITICAL_LOW);
    let systolic = reading
        .systolic_mm_hg
        .is_some_and(|v| v > SYSTOLIC_CRITICAL_HIGH);
    let diastolic = reading
        .diastolic_mm_hg
        .is_some_and(|v| v > DIASTOLIC_CRITICAL_HIGH);
    let spo2 = reading.spo2_percent.is_some_and(|v| v < SPO2_CRITICAL_LOW);
    let temp = reading
        .temperature_c
        .is_some_and(|v| v > TEMP_CRITICAL_HIGH_C || v < TEMP_CRITICAL_LOW_C);
    hr || systolic || diastolic || spo2 || temp
}

fn is_abnormal(reading: &VitalsReading) -> bool {
    let hr = reading
        .heart_rate_bpm
        .is_some_and(|v| v > HR_ABNORMAL_HIGH || v < HR_ABNORMAL_LOW);
    let systolic = reading
        .systolic_mm_hg
        .is_some_and(|v| v > SYSTOLIC_ABNORMAL_HIGH);
    let diastolic = reading
        .diastolic_mm_hg
        .is_some_and(|v| v > DIASTOLIC_ABNORMAL_HIGH);
    let spo2 = reading.spo2_percent.is_some_and(|v| v < SPO2_ABNORMAL_LOW);
    let temp = reading
        .temperature_c
        .is_some_and(|v| v > TEMP_ABNORMAL_HIGH_C || v < TEMP_ABNORMAL_LOW_C);
    hr || systolic || diastolic || spo2 || temp
}
