use std::sync::Arc;

use clap::Parser;
use replog_core::{Log, Mode, ReplicationBlock};
use replog_secondary::config::Args;
use replog_secondary::state::SecondaryState;
use replog_secondary::{routes, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "replog_secondary=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    if args.mode != Mode::Secondary {
        anyhow::bail!("this binary only runs as mode=secondary, got {}", args.mode);
    }
    tracing::info!(port = args.port, "starting secondary");

    let state = SecondaryState {
        log: Arc::new(Log::new()),
        block: Arc::new(ReplicationBlock::new()),
    };

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    tracing::info!(port = args.port, "secondary listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    Ok(())
}
