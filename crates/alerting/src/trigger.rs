//! In-process evaluation trigger bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! Ingestion publishes an [`EvaluationTrigger`] when it persists a critical
//! sample; the monitor loop subscribes and evaluates that subject without
//! waiting for the next sweep. The bus is a latency optimization, not the
//! reliability mechanism: the periodic sweep re-reads every subject's
//! latest sample, so a lagged or dropped trigger delays an evaluation by at
//! most one tick instead of losing it.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use wristbud_core::types::{DbId, Timestamp};
use wristbud_core::Severity;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A request to evaluate one subject's latest sample immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationTrigger {
    pub subject_id: DbId,
    pub sample_id: DbId,
    /// Severity derived at ingestion. The monitor re-derives its own; this
    /// field exists for logging only.
    pub severity: Severity,
    pub recorded_at: Timestamp,
}

/// In-process fan-out bus for evaluation triggers.
///
/// Shared via `Arc<TriggerBus>` between the ingestion service and the
/// monitor loop.
pub struct TriggerBus {
    sender: broadcast::Sender<EvaluationTrigger>,
}

impl TriggerBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a trigger to all current subscribers.
    ///
    /// With zero receivers the trigger is dropped; the periodic sweep
    /// covers the evaluation.
    pub fn publish(&self, trigger: EvaluationTrigger) {
        let _ = self.sender.send(trigger);
    }

    /// Subscribe to all triggers published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<EvaluationTrigger> {
        self.sender.subscribe()
    }
}

impl Default for TriggerBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
