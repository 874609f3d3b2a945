//! Time-windowed alert deduplication.
//!
//! Tracks the last notification time per (subject, alert kind) and
//! suppresses repeats inside a cooldown window (default 30 minutes). The
//! check-then-record step is a single atomic claim so that two samples for
//! the same subject arriving near-simultaneously cannot both pass.
//!
//! [`PgCooldownStore`] is the durable implementation; its atomicity comes
//! from a conditional upsert on the unique (subject_id, alert_kind) index,
//! so unrelated keys never contend and no lock is held across the
//! subsequent transport call. [`MemoryCooldownStore`] backs unit tests and
//! single-process ephemeral deployments.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use wristbud_core::types::{DbId, Timestamp};
use wristbud_core::AlertKind;
use wristbud_db::repositories::CooldownRepo;
use wristbud_db::DbPool;

/// The pair that scopes cooldown suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub subject_id: DbId,
    pub kind: AlertKind,
}

/// Last-notified bookkeeping behind the deduplicator.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Whether a notification for `key` would currently be allowed.
    /// Read-only; does not reserve anything.
    async fn should_notify(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error>;

    /// Unconditionally record a dispatched notification for `key`.
    async fn record_notified(&self, key: DedupKey, now: Timestamp) -> Result<(), sqlx::Error>;

    /// Atomic check-then-record: returns `true` and stamps `now` iff no
    /// prior stamp for `key` lies inside the cooldown window. Exactly one
    /// of two concurrent claims for the same key succeeds.
    async fn try_claim(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PgCooldownStore
// ---------------------------------------------------------------------------

/// Durable cooldown state in the `alert_cooldowns` table.
pub struct PgCooldownStore {
    pool: DbPool,
    window: Duration,
}

impl PgCooldownStore {
    pub fn new(pool: DbPool, window: Duration) -> Self {
        Self { pool, window }
    }
}

#[async_trait]
impl CooldownStore for PgCooldownStore {
    async fn should_notify(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error> {
        CooldownRepo::should_notify(&self.pool, key.subject_id, key.kind.as_str(), now, self.window)
            .await
    }

    async fn record_notified(&self, key: DedupKey, now: Timestamp) -> Result<(), sqlx::Error> {
        CooldownRepo::record_notified(&self.pool, key.subject_id, key.kind.as_str(), now).await
    }

    async fn try_claim(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error> {
        CooldownRepo::try_claim(&self.pool, key.subject_id, key.kind.as_str(), now, self.window)
            .await
    }
}

// ---------------------------------------------------------------------------
// MemoryCooldownStore
// ---------------------------------------------------------------------------

/// In-memory cooldown state behind a mutex.
///
/// The whole claim happens under one lock acquisition, which serializes
/// per-key check-then-record without any I/O inside the critical section.
pub struct MemoryCooldownStore {
    window: Duration,
    stamps: Mutex<HashMap<DedupKey, Timestamp>>,
}

impl MemoryCooldownStore {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            stamps: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn should_notify(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error> {
        let stamps = self.stamps.lock().expect("cooldown mutex poisoned");
        Ok(match stamps.get(&key) {
            Some(last) => *last <= now - self.window,
            None => true,
        })
    }

    async fn record_notified(&self, key: DedupKey, now: Timestamp) -> Result<(), sqlx::Error> {
        let mut stamps = self.stamps.lock().expect("cooldown mutex poisoned");
        stamps.insert(key, now);
        Ok(())
    }

    async fn try_claim(&self, key: DedupKey, now: Timestamp) -> Result<bool, sqlx::Error> {
        let mut stamps = self.stamps.lock().expect("cooldown mutex poisoned");
        let allowed = match stamps.get(&key) {
            Some(last) => *last <= now - self.window,
            None => true,
        };
        if allowed {
            stamps.insert(key, now);
        }
        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn key(subject_id: DbId) -> DedupKey {
        DedupKey {
            subject_id,
            kind: AlertKind::HealthCritical,
        }
    }

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn store() -> MemoryCooldownStore {
        MemoryCooldownStore::new(Duration::minutes(30))
    }

    #[tokio::test]
    async fn first_claim_always_wins() {
        let store = store();
        assert!(store.try_claim(key(1), t0()).await.unwrap());
    }

    /// Two critical samples 5 minutes apart: exactly one dispatch.
    #[tokio::test]
    async fn repeat_inside_window_is_suppressed() {
        let store = store();
        assert!(store.try_claim(key(1), t0()).await.unwrap());
        assert!(!store
            .try_claim(key(1), t0() + Duration::minutes(5))
            .await
            .unwrap());
    }

    /// Two critical samples 40 minutes apart: two dispatches.
    #[tokio::test]
    async fn repeat_after_window_is_allowed() {
        let store = store();
        assert!(store.try_claim(key(1), t0()).await.unwrap());
        assert!(store
            .try_claim(key(1), t0() + Duration::minutes(40))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn unrelated_keys_do_not_interfere() {
        let store = store();
        assert!(store.try_claim(key(1), t0()).await.unwrap());
        // Different subject, same kind.
        assert!(store.try_claim(key(2), t0()).await.unwrap());
        // Same subject, different kind.
        let abnormal = DedupKey {
            subject_id: 1,
            kind: AlertKind::HealthAbnormal,
        };
        assert!(store.try_claim(abnormal, t0()).await.unwrap());
    }

    #[tokio::test]
    async fn failed_claim_does_not_refresh_the_stamp() {
        let store = store();
        assert!(store.try_claim(key(1), t0()).await.unwrap());
        // Suppressed claim at +20 min must not push the window forward:
        // a claim at +35 min from the original stamp still succeeds.
        assert!(!store
            .try_claim(key(1), t0() + Duration::minutes(20))
            .await
            .unwrap());
        assert!(store
            .try_claim(key(1), t0() + Duration::minutes(35))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn should_notify_is_read_only() {
        let store = store();
        assert!(store.should_notify(key(1), t0()).await.unwrap());
        // Still unclaimed afterwards.
        assert!(store.try_claim(key(1), t0()).await.unwrap());
    }

    #[tokio::test]
    async fn record_notified_starts_the_window() {
        let store = store();
        store.record_notified(key(1), t0()).await.unwrap();
        assert!(!store
            .should_notify(key(1), t0() + Duration::minutes(10))
            .await
            .unwrap());
        assert!(store
            .should_notify(key(1), t0() + Duration::minutes(30))
            .await
            .unwrap());
    }

    /// Concurrent claims for the same key: exactly one winner.
    #[tokio::test]
    async fn concurrent_claims_single_winner() {
        let store = std::sync::Arc::new(store());
        let now = t0();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.try_claim(key(1), now).await },
            ));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
