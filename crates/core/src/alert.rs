//! Alert kinds and delivery status types.

use serde::{Deserialize, Serialize};

/// Kind of an emergency alert, scoping the deduplication cooldown.
///
/// The wire names match the `alert_type` values of the original
/// `alerts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// A vitals sample classified as critical.
    HealthCritical,
    /// A vitals sample classified as abnormal.
    HealthAbnormal,
    /// A manually or externally triggered emergency.
    Emergency,
}

impl AlertKind {
    /// Canonical snake_case name, as stored in the `alert_kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::HealthCritical => "health_critical",
            AlertKind::HealthAbnormal => "health_abnormal",
            AlertKind::Emergency => "emergency",
        }
    }

    /// The alert kind raised for a sample of the given severity, if any.
    pub fn for_severity(severity: crate::Severity) -> Option<Self> {
        match severity {
            crate::Severity::Critical => Some(AlertKind::HealthCritical),
            crate::Severity::Abnormal => Some(AlertKind::HealthAbnormal),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall delivery status of an alert.
///
/// Transitions are monotone: `Pending` moves to exactly one terminal
/// state and terminal states never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Created, dispatch not yet finished.
    Pending,
    /// At least one contact received the message.
    Sent,
    /// Every transport attempt failed.
    Failed,
    /// No enabled contact existed; no transport call was made.
    Skipped,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Skipped => "skipped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(DeliveryStatus::Pending),
            "sent" => Some(DeliveryStatus::Sent),
            "failed" => Some(DeliveryStatus::Failed),
            "skipped" => Some(DeliveryStatus::Skipped),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, DeliveryStatus::Pending)
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single per-contact delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Sent,
    Failed,
    /// Recorded once per alert when no enabled contact exists.
    NoRecipient,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Sent => "sent",
            AttemptStatus::Failed => "failed",
            AttemptStatus::NoRecipient => "no_recipient",
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
