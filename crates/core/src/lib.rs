//! Pure domain logic for the WristBud health-alerting core.
//!
//! This crate has no I/O. It defines the vitals and alert domain types,
//! the clinical [`classifier`], and deterministic alert [`message`]
//! composition. Persistence lives in `wristbud-db`, orchestration in
//! `wristbud-alerting`.

pub mod alert;
pub mod classifier;
pub mod contact;
pub mod error;
pub mod message;
pub mod severity;
pub mod types;
pub mod vitals;

pub use alert::{AlertKind, AttemptStatus, DeliveryStatus};
pub use classifier::classify;
pub use contact::EmergencyContact;
pub use error::CoreError;
pub use severity::Severity;
pub use vitals::VitalsReading;
