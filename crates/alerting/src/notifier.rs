//! Outbound SMS dispatch with concurrent per-contact fan-out.
//!
//! [`SmsTransport`] abstracts the concrete gateway; [`HttpSmsGateway`] is
//! the production implementation (HTTP POST with a bounded timeout).
//! [`Notifier::dispatch`] fans one alert out to every enabled contact in
//! parallel and reports each attempt's outcome individually; one failing
//! contact never blocks the others.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use wristbud_core::{AttemptStatus, DeliveryStatus, EmergencyContact};

/// HTTP request timeout for a single send attempt. Exceeding it counts as
/// a failed attempt, not a retry-forever condition.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a single transport attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("SMS gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("SMS gateway returned HTTP {0}")]
    Gateway(u16),
}

// ---------------------------------------------------------------------------
// SmsTransport
// ---------------------------------------------------------------------------

/// Outbound channel abstraction: deliver one message to one phone number.
///
/// The concrete carrier integration lives behind this trait; tests swap in
/// recording mocks.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// HttpSmsGateway
// ---------------------------------------------------------------------------

/// SMS dispatch via an HTTP gateway endpoint.
pub struct HttpSmsGateway {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSmsGateway {
    /// Create a gateway client for the given endpoint URL.
    pub fn new(url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, url, token }
    }
}

#[async_trait]
impl SmsTransport for HttpSmsGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<(), TransportError> {
        let payload = serde_json::json!({
            "to": phone,
            "message": message,
        });

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Gateway(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Outcome of one per-contact delivery attempt.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// `None` for the synthetic `no_recipient` outcome.
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub status: AttemptStatus,
    pub failure_reason: Option<String>,
}

/// Aggregated result of dispatching one alert.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// Terminal delivery status for the alert: `Sent` if at least one
    /// contact succeeded, `Failed` if all attempts failed, `Skipped` when
    /// there was nobody to send to.
    pub status: DeliveryStatus,
    pub outcomes: Vec<DeliveryOutcome>,
}

/// Composes nothing, retries nothing: takes a pre-rendered message and
/// fans it out to the enabled contacts concurrently.
pub struct Notifier {
    transport: Arc<dyn SmsTransport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn SmsTransport>) -> Self {
        Self { transport }
    }

    /// Dispatch `message` to every contact with SMS alerts enabled.
    ///
    /// Disabled contacts are skipped without a transport call. With zero
    /// enabled contacts the report carries a single
    /// [`AttemptStatus::NoRecipient`] outcome and status `Skipped`, a
    /// non-failure observable in the delivery log.
    pub async fn dispatch(&self, contacts: &[EmergencyContact], message: &str) -> DispatchReport {
        let enabled: Vec<&EmergencyContact> =
            contacts.iter().filter(|c| c.sms_alerts_enabled).collect();

        if enabled.is_empty() {
            tracing::warn!(
                total_contacts = contacts.len(),
                "No enabled emergency contact configured, skipping dispatch"
            );
            return DispatchReport {
                status: DeliveryStatus::Skipped,
                outcomes: vec![DeliveryOutcome {
                    contact_name: None,
                    phone: None,
                    status: AttemptStatus::NoRecipient,
                    failure_reason: None,
                }],
            };
        }

        let attempts = enabled.iter().map(|contact| async move {
            match self.transport.send(&contact.phone, message).await {
                Ok(()) => {
                    tracing::info!(contact = %contact.name, "Alert SMS sent");
                    DeliveryOutcome {
                        contact_name: Some(contact.name.clone()),
                        phone: Some(contact.phone.clone()),
                        status: AttemptStatus::Sent,
                        failure_reason: None,
                    }
                }
                Err(e) => {
                    tracing::error!(contact = %contact.name, error = %e, "Alert SMS failed");
                    DeliveryOutcome {
                        contact_name: Some(contact.name.clone()),
                        phone: Some(contact.phone.clone()),
                        status: AttemptStatus::Failed,
                        failure_reason: Some(e.to_string()),
                    }
                }
            }
        });

        let outcomes = join_all(attempts).await;
        let any_sent = outcomes.iter().any(|o| o.status == AttemptStatus::Sent);

        DispatchReport {
            status: if any_sent {
                DeliveryStatus::Sent
            } else {
                DeliveryStatus::Failed
            },
            outcomes,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Transport that records calls and fails for configured phone numbers.
    struct MockTransport {
        calls: Mutex<Vec<String>>,
        fail_for: Vec<String>,
    }

    impl MockTransport {
        fn new(fail_for: &[&str]) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_for: fail_for.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SmsTransport for MockTransport {
        async fn send(&self, phone: &str, _message: &str) -> Result<(), TransportError> {
            self.calls.lock().unwrap().push(phone.to_string());
            if self.fail_for.iter().any(|p| p == phone) {
                return Err(TransportError::Gateway(502));
            }
            Ok(())
        }
    }

    fn contact(name: &str, phone: &str, enabled: bool) -> EmergencyContact {
        EmergencyContact {
            owner_subject_id: 1,
            name: name.to_string(),
            phone: phone.to_string(),
            relationship: None,
            sms_alerts_enabled: enabled,
        }
    }

    /// Three enabled contacts, one transport failure: status Sent, exactly
    /// three outcomes (two sent, one failed).
    #[tokio::test]
    async fn partial_failure_still_counts_as_sent() {
        let transport = Arc::new(MockTransport::new(&["+200"]));
        let notifier = Notifier::new(transport.clone());
        let contacts = vec![
            contact("A", "+100", true),
            contact("B", "+200", true),
            contact("C", "+300", true),
        ];

        let report = notifier.dispatch(&contacts, "msg").await;

        assert_eq!(report.status, DeliveryStatus::Sent);
        assert_eq!(report.outcomes.len(), 3);
        let sent = report
            .outcomes
            .iter()
            .filter(|o| o.status == AttemptStatus::Sent)
            .count();
        let failed = report
            .outcomes
            .iter()
            .filter(|o| o.status == AttemptStatus::Failed)
            .count();
        assert_eq!((sent, failed), (2, 1));
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn all_failures_mark_alert_failed() {
        let transport = Arc::new(MockTransport::new(&["+100", "+200"]));
        let notifier = Notifier::new(transport);
        let contacts = vec![contact("A", "+100", true), contact("B", "+200", true)];

        let report = notifier.dispatch(&contacts, "msg").await;

        assert_eq!(report.status, DeliveryStatus::Failed);
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.status == AttemptStatus::Failed));
        assert!(report.outcomes[0].failure_reason.is_some());
    }

    /// Disabled contacts get no transport call; the alert is skipped, not
    /// failed.
    #[tokio::test]
    async fn disabled_contacts_yield_no_recipient() {
        let transport = Arc::new(MockTransport::new(&[]));
        let notifier = Notifier::new(transport.clone());
        let contacts = vec![contact("A", "+100", false)];

        let report = notifier.dispatch(&contacts, "msg").await;

        assert_eq!(report.status, DeliveryStatus::Skipped);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].status, AttemptStatus::NoRecipient);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_contacts_yield_no_recipient() {
        let transport = Arc::new(MockTransport::new(&[]));
        let notifier = Notifier::new(transport.clone());

        let report = notifier.dispatch(&[], "msg").await;

        assert_eq!(report.status, DeliveryStatus::Skipped);
        assert_eq!(report.outcomes[0].status, AttemptStatus::NoRecipient);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn mixed_enabled_and_disabled_only_dials_enabled() {
        let transport = Arc::new(MockTransport::new(&[]));
        let notifier = Notifier::new(transport.clone());
        let contacts = vec![contact("A", "+100", true), contact("B", "+200", false)];

        let report = notifier.dispatch(&contacts, "msg").await;

        assert_eq!(report.status, DeliveryStatus::Sent);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(transport.calls(), vec!["+100".to_string()]);
    }

    #[test]
    fn transport_error_display_gateway() {
        let err = TransportError::Gateway(503);
        assert_eq!(err.to_string(), "SMS gateway returned HTTP 503");
    }
}
