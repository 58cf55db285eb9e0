//! pinpulse server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), restores the
//! user's profile from SQLite, serves the JSON API over HTTP and saves the
//! profile again on Ctrl-C.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use pinpulse_server::{ServerConfig, Session, open_store, router};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "PinPulse community reporting server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let server_cfg = ServerConfig::load(&cli.config).context("failed to read configuration")?;
  let achievements = server_cfg
    .achievement_table()
    .context("invalid achievement table in configuration")?;

  // Open the profile store.
  let store = open_store(server_cfg.store_path.as_deref())
    .await
    .context("failed to open profile store")?;

  let session = Session::open(store, achievements, server_cfg.seed_sample_reports).await;

  let app = router(session.ledger(), &server_cfg);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  // Save the profile even when the server stopped with an error.
  let served = axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await;
  session.close().await.context("failed to save profile")?;
  served.context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
