//! Manually raised emergency alerts (SOS).
//!
//! The boundary layer calls [`EmergencyService::raise`] when a subject or
//! device triggers an explicit emergency, independent of classification.
//! The path shares the dedup → notifier → alert log pipeline with the
//! monitor loop, scoped under the `emergency` alert kind.

use std::sync::Arc;

use chrono::Utc;
use wristbud_core::types::DbId;
use wristbud_core::vitals::Location;
use wristbud_core::{message, AlertKind, DeliveryStatus, EmergencyContact, Severity};
use wristbud_db::models::alert::NewAlert;
use wristbud_db::repositories::{AlertRepo, ContactRepo, SmsDeliveryRepo, VitalsSampleRepo};
use wristbud_db::DbPool;

use crate::dedup::{CooldownStore, DedupKey};
use crate::notifier::Notifier;

/// Result of raising an emergency.
#[derive(Debug)]
pub enum EmergencyOutcome {
    /// Inside the cooldown window for this subject's emergency kind.
    Suppressed,
    /// An alert was created and dispatch finished with the given status.
    Raised {
        alert_id: DbId,
        status: DeliveryStatus,
    },
}

/// Drives the notification pipeline for explicit emergencies.
pub struct EmergencyService {
    pool: DbPool,
    cooldowns: Arc<dyn CooldownStore>,
    notifier: Notifier,
}

impl EmergencyService {
    pub fn new(pool: DbPool, cooldowns: Arc<dyn CooldownStore>, notifier: Notifier) -> Self {
        Self {
            pool,
            cooldowns,
            notifier,
        }
    }

    /// Raise an emergency for a subject.
    ///
    /// Attaches the subject's latest vitals as context when one exists.
    /// `location` falls back to the latest sample's location when empty.
    pub async fn raise(
        &self,
        subject_id: DbId,
        note: Option<&str>,
        location: Location,
    ) -> Result<EmergencyOutcome, sqlx::Error> {
        let key = DedupKey {
            subject_id,
            kind: AlertKind::Emergency,
        };
        if !self.cooldowns.try_claim(key, Utc::now()).await? {
            tracing::info!(subject_id, "Emergency suppressed by cooldown");
            return Ok(EmergencyOutcome::Suppressed);
        }

        let latest = VitalsSampleRepo::latest(&self.pool, subject_id).await?;
        let reading = latest.as_ref().map(|sample| sample.reading());

        let subject_name = ContactRepo::subject_name(&self.pool, subject_id)
            .await?
            .unwrap_or_else(|| format!("Subject {subject_id}"));
        let contacts: Vec<EmergencyContact> = ContactRepo::list_for_subject(&self.pool, subject_id)
            .await?
            .into_iter()
            .map(EmergencyContact::from)
            .collect();

        let text =
            message::compose_emergency_message(&subject_name, reading.as_ref(), note, Utc::now());

        let location = if location.is_empty() {
            reading.map(|r| r.location).unwrap_or_default()
        } else {
            location
        };
        let alert_id = AlertRepo::create(
            &self.pool,
            &NewAlert {
                subject_id,
                kind: AlertKind::Emergency,
                severity: Severity::Critical,
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

        Ok(EmergencyOutcome::Raised {
            alert_id,
            status: report.status,
        })
    }
}
