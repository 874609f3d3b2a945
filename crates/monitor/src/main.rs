//! Monitor service entry point.
//!
//! Wires the pool, trigger bus, SMS gateway, and the health monitor loop,
//! and shuts the loop down gracefully on ctrl-c.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wristbud_alerting::{
    HealthMonitor, HttpSmsGateway, MonitorConfig, Notifier, PgCooldownStore, TriggerBus,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wristbud_monitor=info,wristbud_alerting=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = wristbud_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    wristbud_db::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    let config = MonitorConfig::from_env();
    let gateway_url = config
        .sms_gateway_url
        .clone()
        .context("SMS_GATEWAY_URL must be set")?;

    let transport = Arc::new(HttpSmsGateway::new(
        gateway_url,
        config.sms_gateway_token.clone(),
    ));
    let notifier = Notifier::new(transport);
    let cooldowns = Arc::new(PgCooldownStore::new(pool.clone(), config.cooldown_window));
    let bus = Arc::new(TriggerBus::default());

    let monitor = HealthMonitor::new(pool, cooldowns, notifier, bus, config);

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move { monitor.run(loop_cancel).await });

    tracing::info!("Health monitor started");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received");
    cancel.cancel();

    handle.await.context("Monitor task panicked")?;
    tracing::info!("Health monitor stopped");

    Ok(())
}
