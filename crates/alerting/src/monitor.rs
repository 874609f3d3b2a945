//! Periodic health monitor loop.
//!
//! [`HealthMonitor`] is the single owner of notification decisions. It
//! evaluates subjects on two paths that converge on the same per-subject
//! routine: a fixed-interval sweep over every subject with samples, and
//! low-latency triggers from the ingestion bus for critical samples. The
//! sweep is the at-least-once backstop; the dedup claim absorbs the
//! duplicate evaluations that at-least-once implies.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use wristbud_core::types::DbId;
use wristbud_core::vitals::Location;
use wristbud_core::{classify, message, AlertKind, DeliveryStatus, EmergencyContact, Severity};
use wristbud_db::models::alert::NewAlert;
use wristbud_db::repositories::{AlertRepo, ContactRepo, SmsDeliveryRepo, VitalsSampleRepo};
use wristbud_db::DbPool;

use crate::config::MonitorConfig;
use crate::dedup::{CooldownStore, DedupKey};
use crate::notifier::Notifier;
use crate::trigger::TriggerBus;

/// What one per-subject evaluation decided.
#[derive(Debug)]
pub enum EvalOutcome {
    /// The subject has no samples yet.
    NoSample,
    /// Latest sample re-classified below the alert bar.
    NotAlertable(Severity),
    /// Inside the cooldown window for this (subject, kind); no dispatch.
    Suppressed(AlertKind),
    /// An alert was created and dispatch finished with the given status.
    Notified {
        alert_id: DbId,
        status: DeliveryStatus,
    },
}

/// Periodic orchestrator: classifier → deduplicator → notifier → alert log.
pub struct HealthMonitor {
    pool: DbPool,
    cooldowns: Arc<dyn CooldownStore>,
    notifier: Notifier,
    bus: Arc<TriggerBus>,
    config: MonitorConfig,
}

impl HealthMonitor {
    pub fn new(
        pool: DbPool,
        cooldowns: Arc<dyn CooldownStore>,
        notifier: Notifier,
        bus: Arc<TriggerBus>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            pool,
            cooldowns,
            notifier,
            bus,
            config,
        }
    }

    /// Run the monitor loop until cancelled.
    ///
    /// Shutdown is graceful: cancellation stops scheduling, and any sweep
    /// or trigger evaluation in flight completes before `run` returns, so
    /// no alert is left in `pending`.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut triggers = self.bus.subscribe();
        let mut interval = tokio::time::interval(self.config.tick_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Health monitor cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.sweep().await;
                }
                trigger = triggers.recv() => {
                    match trigger {
                        Ok(trigger) => {
                            tracing::debug!(
                                subject_id = trigger.subject_id,
                                sample_id = trigger.sample_id,
                                "Evaluation trigger received"
                            );
                            self.evaluate_and_log(trigger.subject_id).await;
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            // The next sweep re-reads every subject.
                            tracing::warn!(skipped = n, "Trigger bus lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::warn!("Trigger bus closed, sweeps continue");
                            triggers = self.bus.subscribe();
                        }
                    }
                }
            }
        }
    }

    /// Evaluate every subject with at least one sample.
    ///
    /// Subjects run concurrently; a failure for one is logged and isolated
    /// so it never stalls the batch, and is retried on the next tick.
    pub async fn sweep(&self) {
        let subject_ids = match VitalsSampleRepo::list_subject_ids(&self.pool).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list subjects, retrying next tick");
                return;
            }
        };

        let evaluations = subject_ids
            .into_iter()
            .map(|subject_id| self.evaluate_and_log(subject_id));
        futures::future::join_all(evaluations).await;
    }

    /// Per-subject evaluation with error isolation.
    async fn evaluate_and_log(&self, subject_id: DbId) {
        match self.evaluate_subject(subject_id).await {
            Ok(EvalOutcome::Notified { alert_id, status }) => {
                tracing::info!(subject_id, alert_id, status = %status, "Alert dispatched");
            }
            Ok(EvalOutcome::Suppressed(kind)) => {
                tracing::info!(subject_id, kind = %kind, "Alert suppressed by cooldown");
            }
            Ok(EvalOutcome::NoSample | EvalOutcome::NotAlertable(_)) => {}
            Err(e) => {
                tracing::error!(subject_id, error = %e, "Evaluation failed, retrying next tick");
            }
        }
    }

    /// Evaluate one subject's latest sample and drive the pipeline.
    ///
    /// Severity is always re-derived from the raw vitals; the stored
    /// column is for history readers, not for decisions. The dedup claim
    /// happens before any network call and is never held across one.
    pub async fn evaluate_subject(&self, subject_id: DbId) -> Result<EvalOutcome, sqlx::Error> {
        let Some(sample) = VitalsSampleRepo::latest(&self.pool, subject_id).await? else {
            return Ok(EvalOutcome::NoSample);
        };

        let reading = sample.reading();
        let severity = classify(&reading);
        let Some(kind) = AlertKind::for_severity(severity) else {
            return Ok(EvalOutcome::NotAlertable(severity));
        };

        let key = DedupKey { subject_id, kind };
        if !self.cooldowns.try_claim(key, Utc::now()).await? {
            return Ok(EvalOutcome::Suppressed(kind));
        }

        let subject_name = ContactRepo::subject_name(&self.pool, subject_id)
            .await?
            .unwrap_or_else(|| format!("Subject {subject_id}"));
        let contacts: Vec<EmergencyContact> = ContactRepo::list_for_subject(&self.pool, subject_id)
            .await?
            .into_iter()
            .map(EmergencyContact::from)
            .collect();

        let text = message::compose_alert_message(
            &subject_name,
            kind,
            severity,
            &reading,
            sample.recorded_at,
        );

        let location = Location {
            latitude: sample.location_latitude,
            longitude: sample.location_longitude,
            address: sample.location_address.clone(),
        };
        let alert_id = AlertRepo::create(
            &self.pool,
            &NewAlert {
                subject_id,
                kind,
                severity,
                message: text.clone(),
                location,
            },
        )
        .await?;

        let report = self.notifier.dispatch(&contacts, &text).await;

        for outcome in &report.outcomes {
            if let Err(e) = SmsDeliveryRepo::record(
                &self.pool,
                alert_id,
                outcome.contact_name.as_deref(),
                outcome.phone.as_deref(),
                outcome.status,
                outcome.failure_reason.as_deref(),
            )
            .await
            {
                tracing::error!(alert_id, error = %e, "Failed to record delivery outcome");
            }
        }

        AlertRepo::update_delivery_status(&self.pool, alert_id, report.status).await?;

        Ok(EvalOutcome::Notified {
            alert_id,
            status: report.status,
        })
    }
}
