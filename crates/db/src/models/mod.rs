//! Row structs and create DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where one is needed

pub mod alert;
pub mod contact;
pub mod cooldown;
pub mod vitals;

pub use alert::{Alert, NewAlert, SmsDeliveryAttempt};
pub use contact::EmergencyContactRow;
pub use cooldown::AlertCooldown;
pub use vitals::{NewVitalsSample, VitalsSample};
