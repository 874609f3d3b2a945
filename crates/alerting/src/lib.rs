//! WristBud alerting pipeline.
//!
//! This crate owns everything between a persisted vitals sample and a
//! delivered emergency SMS:
//!
//! - [`TriggerBus`]: in-process pub/sub hub that carries critical-sample
//!   evaluation triggers from ingestion to the monitor loop.
//! - [`SampleIngest`]: validates, classifies, and persists incoming
//!   readings, publishing a trigger for critical ones.
//! - [`dedup`]: time-windowed notification suppression per
//!   (subject, alert kind).
//! - [`notifier`]: SMS transport abstraction and concurrent fan-out.
//! - [`HealthMonitor`]: the periodic orchestrator.
//! - [`EmergencyService`]: manually raised (SOS) alerts sharing the same
//!   pipeline.

pub mod config;
pub mod dedup;
pub mod emergency;
pub mod ingest;
pub mod monitor;
pub mod notifier;
pub mod trigger;

pub use config::MonitorConfig;
pub use dedup::{CooldownStore, DedupKey, MemoryCooldownStore, PgCooldownStore};
pub use emergency::{EmergencyOutcome, EmergencyService};
pub use ingest::{IngestError, SampleIngest};
pub use monitor::{EvalOutcome, HealthMonitor};
pub use notifier::{HttpSmsGateway, Notifier, SmsTransport, TransportError};
pub use trigger::{EvaluationTrigger, TriggerBus};
