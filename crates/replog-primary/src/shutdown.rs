use std::sync::Arc;

use replog_core::HealthMonitor;
use tokio::sync::watch;
use tracing::info;

/// Waits for Ctrl+C, then signals the health monitor and every delivery
/// worker to stop. Delivery workers still in flight are simply dropped after
/// this — harmless, since the secondary applier is idempotent and a retry
/// gap after restart is exactly what "retry forever" already tolerates.
pub async fn signal(health: Arc<HealthMonitor>, worker_shutdown: watch::Sender<bool>) {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("shutdown signal received, draining background tasks");
    health.shutdown();
    let _ = worker_shutdown.send(true);
}
