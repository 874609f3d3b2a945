//! Deterministic alert message composition.
//!
//! One alert produces one message text shared by every contact it fans out
//! to. The structure is fixed regardless of which vitals are present:
//! absent vitals are omitted entirely, never rendered blank.

use crate::alert::AlertKind;
use crate::severity::Severity;
use crate::types::Timestamp;
use crate::vitals::VitalsReading;

/// Signature line appended to every outbound alert.
const SIGNATURE: &str = "- WristBud Health Monitoring";

/// Compose the human-readable SMS body for an alert.
///
/// Includes the alert kind and severity, the subject's name, the sample
/// timestamp, every present vital with its unit, the location when known,
/// and a closing call-to-action.
pub fn compose_alert_message(
    subject_name: &str,
    kind: AlertKind,
    severity: Severity,
    reading: &VitalsReading,
    recorded_at: Timestamp,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("WRISTBUD HEALTH ALERT".to_string());
    lines.push(format!(
        "{} ({}) detected for {} at {}.",
        severity.as_str().to_uppercase(),
        kind.as_str(),
        subject_name,
        recorded_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    lines.push(String::new());

    lines.extend(vital_lines(reading));

    if let Some(address) = &reading.location.address {
        lines.push(format!("Location: {address}"));
    } else if let (Some(lat), Some(lon)) = (reading.location.latitude, reading.location.longitude)
    {
        lines.push(format!("Location: {lat:.5}, {lon:.5}"));
    }

    lines.push(String::new());
    lines.push(call_to_action(subject_name, severity));
    lines.push(SIGNATURE.to_string());

    lines.join("\n")
}

/// Compose the SMS body for a manually raised emergency (SOS).
///
/// Vitals context is attached when a recent sample exists; the note is the
/// free-text message supplied by the subject or device, defaulting to a
/// fixed call for assistance.
pub fn compose_emergency_message(
    subject_name: &str,
    reading: Option<&VitalsReading>,
    note: Option<&str>,
    raised_at: Timestamp,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "EMERGENCY ALERT for {} at {}.",
        subject_name,
        raised_at.format("%Y-%m-%d %H:%M UTC"),
    ));
    lines.push(String::new());

    if let Some(reading) = reading {
        lines.extend(vital_lines(reading));
        if let Some(address) = &reading.location.address {
            lines.push(format!("Location: {address}"));
        }
        lines.push(String::new());
    }

    lines.push(note.unwrap_or("Immediate assistance required.").to_string());
    lines.push(SIGNATURE.to_string());

    lines.join("\n")
}

fn vital_lines(reading: &VitalsReading) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(hr) = reading.heart_rate_bpm {
        lines.push(format!("Heart Rate: {hr:.0} BPM"));
    }
    if let (Some(systolic), Some(diastolic)) = (reading.systolic_mm_hg, reading.diastolic_mm_hg) {
        lines.push(format!("Blood Pressure: {systolic:.0}/{diastolic:.0} mmHg"));
    } else if let Some(systolic) = reading.systolic_mm_hg {
        lines.push(format!("Systolic Pressure: {systolic:.0} mmHg"));
    } else if let Some(diastolic) = reading.diastolic_mm_hg {
        lines.push(format!("Diastolic Pressure: {diastolic:.0} mmHg"));
    }
    if let Some(spo2) = reading.spo2_percent {
        lines.push(format!("Oxygen Level: {spo2:.0}%"));
    }
    if let Some(temp) = reading.temperature_c {
        lines.push(format!("Temperature: {temp:.1} C"));
    }
    lines
}

fn call_to_action(subject_name: &str, severity: Severity) -> String {
    match severity {
        Severity::Critical => format!(
            "This requires immediate attention. Contact {subject_name} now or call emergency services."
        ),
        _ => format!("Please check on {subject_name} and consider a medical consultation."),
    }
}
