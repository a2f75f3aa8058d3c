use std::sync::Arc;

use clap::Parser;
use replog_core::{HealthMonitor, Log, Mode, ReplicationCoordinator};
use replog_primary::config::Args;
use replog_primary::state::PrimaryState;
use replog_primary::{routes, shutdown};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replog_primary=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    if args.mode != Mode::Primary {
        anyhow::bail!("this binary only runs as mode=primary, got {}", args.mode);
    }
    tracing::info!(port = args.port, secondaries = args.secondary_urls.len(), "starting primary");

    let client = reqwest::Client::new();
    let (health, _health_task) = HealthMonitor::start(
        client.clone(),
        args.secondary_urls.clone(),
        args.healthcheck_period(),
        args.request_timeout(),
    )
    .await;

    let (worker_shutdown_tx, worker_shutdown_rx) = watch::channel(false);

    let coordinator = Arc::new(ReplicationCoordinator::new(
        client,
        args.secondary_urls.clone(),
        health.clone(),
        args.backoff_base(),
        args.request_timeout(),
        worker_shutdown_rx,
    ));

    let state = PrimaryState {
        log: Arc::new(Log::new()),
        coordinator,
        max_w: args.secondary_urls.len() as u32 + 1,
    };

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    tracing::info!(port = args.port, "primary listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal(health, worker_shutdown_tx))
        .await?;

    Ok(())
}
