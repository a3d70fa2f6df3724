use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use clap::Parser;
use tracing::info;

use found_api::config::AppConfig;
use found_api::AppState;

#[derive(Parser)]
#[command(name = "found-api")]
#[command(about = "Found-submission tracker with subreddit and user whitelists")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Interface to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Create missing tables before serving")]
    bootstrap_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, EDIT_PASSWORD, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "found_api=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.bootstrap_schema {
        config.database.bootstrap_schema = true;
    }
    info!("Starting Found API in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let state = AppState::connect(config)
        .await
        .context("failed to connect to database")?;
    let app = found_api::service(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Found API listening on http://{}", bind_addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
