use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use roofline_ivr::{create_router, AppState, Config, SessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "roofline-ivr", about = "Call-flow controller for the phone menu")]
struct Args {
    /// Config file (TOML, extension optional); IVR_* env vars override it
    #[arg(long, default_value = "config/roofline-ivr")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Callback base URL: {}", cfg.webhook.public_base_url);
    info!(
        "Menu fallback: {:?}, session TTL: {}s",
        cfg.menu.fallback, cfg.session.ttl_secs
    );

    let bind = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let ttl = Duration::from_secs(cfg.session.ttl_secs);
    let sweep_interval = Duration::from_secs(cfg.session.sweep_interval_secs);

    let state = AppState::new(cfg);

    // Abandoned calls leave sessions and pending recordings behind; sweep
    // them out on an interval.
    let store = state.store.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.evict_idle(ttl).await;
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down");
}
