//! Monitor loop configuration from environment variables.

use std::time::Duration;

/// Default sweep interval: 2 minutes.
const DEFAULT_TICK_SECS: u64 = 120;

/// Default dedup cooldown window: 30 minutes.
const DEFAULT_COOLDOWN_SECS: i64 = 1800;

/// Runtime configuration for the monitor loop and SMS gateway.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Fixed interval between full sweeps.
    pub tick_interval: Duration,
    /// Minimum time between repeat notifications per (subject, kind).
    pub cooldown_window: chrono::Duration,
    /// SMS gateway endpoint. `None` means dispatch is not configured.
    pub sms_gateway_url: Option<String>,
    /// Optional bearer token for the gateway.
    pub sms_gateway_token: Option<String>,
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable              | Default |
    /// |-----------------------|---------|
    /// | `MONITOR_TICK_SECS`   | `120`   |
    /// | `ALERT_COOLDOWN_SECS` | `1800`  |
    /// | `SMS_GATEWAY_URL`     | unset   |
    /// | `SMS_GATEWAY_TOKEN`   | unset   |
    pub fn from_env() -> Self {
        let tick_secs = std::env::var("MONITOR_TICK_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TICK_SECS);
        let cooldown_secs = std::env::var("ALERT_COOLDOWN_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_COOLDOWN_SECS);

        Self {
            tick_interval: Duration::from_secs(tick_secs),
            cooldown_window: chrono::Duration::seconds(cooldown_secs),
            sms_gateway_url: std::env::var("SMS_GATEWAY_URL").ok(),
            sms_gateway_token: std::env::var("SMS_GATEWAY_TOKEN").ok(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(DEFAULT_TICK_SECS),
            cooldown_window: chrono::Duration::seconds(DEFAULT_COOLDOWN_SECS),
            sms_gateway_url: None,
            sms_gateway_token: None,
        }
    }
}
