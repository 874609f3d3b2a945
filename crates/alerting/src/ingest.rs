//! Vitals sample ingestion.
//!
//! The boundary layer hands over an authenticated subject id and a raw
//! [`VitalsReading`]; this service validates it, derives severity exactly
//! once, appends it to the sample store, and publishes an evaluation
//! trigger when the sample is critical.

use std::sync::Arc;

use wristbud_core::types::DbId;
use wristbud_core::{classify, CoreError, Severity, VitalsReading};
use wristbud_db::models::vitals::NewVitalsSample;
use wristbud_db::repositories::VitalsSampleRepo;
use wristbud_db::DbPool;

use crate::trigger::{EvaluationTrigger, TriggerBus};

/// Error surfaced synchronously to the ingestion caller.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The reading carried no numeric vital; nothing was persisted.
    #[error("Invalid vitals sample: {0}")]
    Validation(#[from] CoreError),

    /// The sample store rejected the append. Surfaced to the caller: a
    /// swallowed append is a silently missed emergency evaluation.
    #[error("Sample store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

/// Validates, classifies, persists, and triggers.
pub struct SampleIngest {
    pool: DbPool,
    bus: Arc<TriggerBus>,
}

impl SampleIngest {
    pub fn new(pool: DbPool, bus: Arc<TriggerBus>) -> Self {
        Self { pool, bus }
    }

    /// Ingest one reading for a subject.
    ///
    /// Returns the persisted sample id and the derived severity. Critical
    /// samples additionally publish an [`EvaluationTrigger`] so the monitor
    /// loop evaluates the subject without waiting for the next sweep; the
    /// loop owns all notification decisions.
    pub async fn ingest(
        &self,
        subject_id: DbId,
        reading: VitalsReading,
    ) -> Result<(DbId, Severity), IngestError> {
        reading.validate()?;

        let severity = classify(&reading);
        let sample = NewVitalsSample {
            subject_id,
            reading,
            severity,
        };
        let sample_id = VitalsSampleRepo::insert(&self.pool, &sample).await?;

        tracing::debug!(subject_id, sample_id, severity = %severity, "Sample ingested");

        if severity == Severity::Critical {
            self.bus.publish(EvaluationTrigger {
                subject_id,
                sample_id,
                severity,
                recorded_at: sample.reading.recorded_at.unwrap_or_else(chrono::Utc::now),
            });
        }

        Ok((sample_id, severity))
    }
}
