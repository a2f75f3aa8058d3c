use tracing::info;

/// Waits for Ctrl+C so `axum::serve` can drain in-flight requests before
/// exiting. The secondary has no background workers of its own to stop.
pub async fn signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    info!("shutdown signal received, draining in-flight requests");
}
