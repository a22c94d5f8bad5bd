//! roster-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the person API over HTTP until Ctrl-C.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_api::{PeopleService, api_router};
use roster_enrich::{Enricher, HttpLookup};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Roster person API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let cfg = ServerConfig::load(&cli.config).context("failed to read configuration")?;

  // RUST_LOG wins over the configured level.
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(&cfg.log_level))
    .with_context(|| format!("invalid log_level {:?}", cfg.log_level))?;
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let store_path = cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let lookup = HttpLookup::new(cfg.endpoints()).context("failed to build HTTP client")?;
  let service = Arc::new(PeopleService::new(store, Enricher::new(lookup)));

  let app = api_router(service);
  let address = cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
