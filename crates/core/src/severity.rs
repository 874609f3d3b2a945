//! Clinical severity tiers derived from a vitals sample.

use serde::{Deserialize, Serialize};

/// Severity of a classified vitals sample.
///
/// Derived once at ingestion by [`classify`](crate::classifier::classify)
/// and persisted alongside the sample; consumers that make alerting
/// decisions must re-derive it rather than trust the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// All present vitals are inside their normal ranges.
    Normal,
    /// At least one vital is outside its normal range but none is critical.
    Abnormal,
    /// At least one vital is inside a critical range.
    Critical,
    /// The sample carried no usable numeric vital at all.
    Error,
}

impl Severity {
    /// Canonical lowercase name, as stored in the `severity` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Abnormal => "abnormal",
            Severity::Critical => "critical",
            Severity::Error => "error",
        }
    }

    /// Parse the canonical column value back into a severity.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Severity::Normal),
            "abnormal" => Some(Severity::Abnormal),
            "critical" => Some(Severity::Critical),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Whether this tier warrants the notification pipeline.
    pub fn is_alertable(&self) -> bool {
        matches!(self, Severity::Abnormal | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
