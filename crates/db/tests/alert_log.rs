//! Repository tests for the alert log and delivery records.

use sqlx::PgPool;
use wristbud_core::vitals::Location;
use wristbud_core::{AlertKind, AttemptStatus, DeliveryStatus, Severity};
use wristbud_db::models::alert::NewAlert;
use wristbud_db::repositories::{AlertRepo, SmsDeliveryRepo};

fn new_alert(subject_id: i64) -> NewAlert {
    NewAlert {
        subject_id,
        kind: AlertKind::HealthCritical,
        severity: Severity::Critical,
        message: "test alert".to_string(),
        location: Location::default(),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn alert_starts_pending(pool: PgPool) {
    let alert_id = AlertRepo::create(&pool, &new_alert(1)).await.unwrap();
    let alert = AlertRepo::get(&pool, alert_id).await.unwrap().unwrap();
    assert_eq!(alert.delivery_status, "pending");
    assert_eq!(alert.alert_kind, "health_critical");
}

#[sqlx::test(migrations = "../../migrations")]
async fn delivery_status_transitions_are_monotone(pool: PgPool) {
    let alert_id = AlertRepo::create(&pool, &new_alert(1)).await.unwrap();

    let moved = AlertRepo::update_delivery_status(&pool, alert_id, DeliveryStatus::Sent)
        .await
        .unwrap();
    assert!(moved);

    // Terminal states never revert.
    let moved_again = AlertRepo::update_delivery_status(&pool, alert_id, DeliveryStatus::Failed)
        .await
        .unwrap();
    assert!(!moved_again);

    let alert = AlertRepo::get(&pool, alert_id).await.unwrap().unwrap();
    assert_eq!(alert.delivery_status, "sent");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_for_subject_is_most_recent_first(pool: PgPool) {
    let first = AlertRepo::create(&pool, &new_alert(5)).await.unwrap();
    let second = AlertRepo::create(&pool, &new_alert(5)).await.unwrap();
    // Another subject's alert must not leak in.
    AlertRepo::create(&pool, &new_alert(6)).await.unwrap();

    let alerts = AlertRepo::list_for_subject(&pool, 5, 10).await.unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].id, second);
    assert_eq!(alerts[1].id, first);

    assert_eq!(AlertRepo::count_for_subject(&pool, 5).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delivery_attempts_record_per_contact_outcomes(pool: PgPool) {
    let alert_id = AlertRepo::create(&pool, &new_alert(1)).await.unwrap();

    SmsDeliveryRepo::record(&pool, alert_id, Some("A"), Some("+100"), AttemptStatus::Sent, None)
        .await
        .unwrap();
    SmsDeliveryRepo::record(
        &pool,
        alert_id,
        Some("B"),
        Some("+200"),
        AttemptStatus::Failed,
        Some("SMS gateway returned HTTP 502"),
    )
    .await
    .unwrap();

    let attempts = SmsDeliveryRepo::list_for_alert(&pool, alert_id).await.unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].status, "sent");
    assert_eq!(attempts[1].status, "failed");
    assert_eq!(
        attempts[1].failure_reason.as_deref(),
        Some("SMS gateway returned HTTP 502")
    );
}
