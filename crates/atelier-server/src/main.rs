//! Atelier server binary.

use anyhow::Context;
use atelier_config::load_config;
use atelier_core::{ChatModelClient, DesignStore, GenerationService};
use atelier_server::state::{AppState, build_router};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "atelier-server", about = "Prompt-to-design generation service")]
struct Args {
    /// Path to an atelier.json5 config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured listen host.
    #[arg(long)]
    host: Option<String>,
    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("load config")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if config.model.api_key.is_none() {
        warn!(
            "no model API key configured; set {} before generating designs",
            atelier_config::ENV_API_KEY
        );
    }

    let provider = ChatModelClient::new(&config.model).context("build model client")?;
    let store = Arc::new(DesignStore::new());
    let generator = Arc::new(GenerationService::new(Arc::new(provider)));
    let router = build_router(AppState::new(store, generator));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("listening (addr={addr}, model={})", config.model.name);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {err}");
    }
}
