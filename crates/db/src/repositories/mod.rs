//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod contact_repo;
pub mod cooldown_repo;
pub mod sms_delivery_repo;
pub mod vitals_sample_repo;

pub use alert_repo::AlertRepo;
pub use contact_repo::ContactRepo;
pub use cooldown_repo::CooldownRepo;
pub use sms_delivery_repo::SmsDeliveryRepo;
pub use vitals_sample_repo::VitalsSampleRepo;
